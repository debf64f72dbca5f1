//! Moodlist library
//!
//! Turns an image into a Spotify playlist that matches its aesthetic and
//! drives playback of the result. The core (collector, publisher, playback
//! controller) works against small capability traits so it can run against
//! Spotify or an in-memory fake.
//!
//! # Modules
//!
//! - `analyzer` - vision model client producing an aesthetic profile
//! - `api` - HTTP handlers of the web server
//! - `catalog` - capability traits for search, playlist mutation and playback
//! - `cli` - command implementations of the binary
//! - `collector` - tiered, deduplicating track collection
//! - `config` - environment based configuration
//! - `error` - error types of every stage
//! - `management` - token handling and browser sessions
//! - `pipeline` - analyze → collect → publish
//! - `playback` - playback state machine over a track list
//! - `publisher` - playlist creation
//! - `server` - router and server startup
//! - `spotify` - Spotify Web API client
//! - `types` - data structures shared across modules
//! - `utils` - small helpers

pub mod analyzer;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod playback;
pub mod publisher;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges (startup, CLI commands) where the concrete
/// error no longer matters.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Status line with a blue `o` marker. Takes `println!` arguments.
///
/// ```
/// info!("Server running at http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Status line with a green checkmark for completed operations.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints to stderr with a red `!` marker and exits with status 1.
///
/// Only for the binary's fatal paths; library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Recoverable problem, printed to stderr with a yellow `!` marker.
///
/// ```
/// warning!("Search for {:?} failed: {}", query, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
