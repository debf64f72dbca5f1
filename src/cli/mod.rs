//! # CLI Module
//!
//! Command implementations of the `moodlist` binary. Every command prints
//! its progress with the crate's status macros and exits non-zero on a
//! fatal error.
//!
//! ## Commands
//!
//! - [`serve`] - runs the web server (login, upload, player endpoints)
//! - [`auth`] - terminal login with PKCE; the token is cached on disk
//! - [`generate`] - runs the image → playlist pipeline for a local file
//!   using the cached token
//!
//! ## Usage
//!
//! ```bash
//! moodlist serve --static-dir ./public
//! moodlist auth
//! moodlist generate ./sunset.jpg --quota 15
//! ```

mod auth;
mod generate;
mod serve;

pub use auth::auth;
pub use generate::generate;
pub use serve::serve;
