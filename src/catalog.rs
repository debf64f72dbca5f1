//! Capabilities the core needs from the music catalog.
//!
//! The collector, publisher and playback controller only talk to these
//! traits. [`crate::spotify::SpotifyClient`] implements all three against the
//! Spotify Web API; tests implement them in memory.

use async_trait::async_trait;

use crate::{
    error::{CatalogError, SearchError},
    types::Track,
};

#[async_trait]
pub trait SearchCapability: Send + Sync {
    /// Free-text track search returning at most `limit` tracks.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Track>, SearchError>;
}

#[async_trait]
pub trait CatalogMutation: Send + Sync {
    /// Account id of the user the credentials belong to.
    async fn current_user_id(&self) -> Result<String, CatalogError>;

    /// Creates an empty playlist and returns its id.
    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String, CatalogError>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;
}

#[async_trait]
pub trait PlaybackDevice: Send + Sync {
    async fn play(&self, device_id: &str, uri: &str) -> Result<(), CatalogError>;

    async fn pause(&self, device_id: &str) -> Result<(), CatalogError>;

    /// Continues whatever the device was playing.
    async fn resume(&self, device_id: &str) -> Result<(), CatalogError>;

    /// Moves the active playback session to `device_id` without starting it.
    async fn transfer_to(&self, device_id: &str) -> Result<(), CatalogError>;
}
