//! Error types for every stage of playlist generation and playback.
//!
//! Stage errors ([`AnalyzerError`], [`CollectError`], [`PublishError`]) are
//! fatal for a generation request and are folded into [`PipelineError`].
//! [`PlaybackError`] is recoverable: the controller never changes state when
//! it returns one. [`SearchError`] only matters inside the collector, which
//! logs and skips it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No refresh token available")]
    MissingRefreshToken,

    #[error("Token endpoint rejected the request: {0}")]
    Rejected(String),

    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to store token: {0}")]
    Storage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure of a single catalog request.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected catalog response: {0}")]
    Decode(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type SearchError = CatalogError;

/// A mood score outside `[0.0, 1.0]`, NaN included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoodError {
    #[error("mood.{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Analyzer unreachable: {0}")]
    Connection(String),

    #[error("Analyzer request timed out")]
    Timeout,

    #[error("Analyzer returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse AI response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("No tracks found for the given image")]
    EmptyResult,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to resolve playlist owner: {0}")]
    Owner(#[source] CatalogError),

    #[error("Failed to create playlist: {0}")]
    Create(#[source] CatalogError),

    #[error("Playlist {playlist_id} was created but tracks could not be added: {source}")]
    AddTracks {
        playlist_id: String,
        #[source]
        source: CatalogError,
    },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Player is not ready yet. Please wait a moment and try again.")]
    DeviceNotReady,

    #[error("Invalid track index: {index} (playlist has {len} tracks)")]
    InvalidIndex { index: i64, len: usize },

    #[error("Couldn't find \"{name}\" by {artist} on Spotify")]
    TrackNotFound { name: String, artist: String },

    #[error("Playback command failed: {0}")]
    Command(#[from] CatalogError),
}

/// The single user-facing failure of image → playlist generation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
