use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;

use super::SpotifyClient;
use crate::{
    catalog::PlaybackDevice,
    error::CatalogError,
    types::{StartPlaybackRequest, TransferPlaybackRequest},
};

// Player endpoints answer 204 No Content on success, so only the status is
// checked.
#[async_trait]
impl PlaybackDevice for SpotifyClient {
    async fn play(&self, device_id: &str, uri: &str) -> Result<(), CatalogError> {
        let body = StartPlaybackRequest {
            uris: vec![uri.to_string()],
        };
        let request = self
            .http
            .put(self.url("/me/player/play"))
            .query(&[("device_id", device_id)])
            .json(&body);

        self.send(request).await.map(|_| ())
    }

    async fn pause(&self, device_id: &str) -> Result<(), CatalogError> {
        let request = self
            .http
            .put(self.url("/me/player/pause"))
            .query(&[("device_id", device_id)])
            .header(CONTENT_LENGTH, 0);

        self.send(request).await.map(|_| ())
    }

    async fn resume(&self, device_id: &str) -> Result<(), CatalogError> {
        let request = self
            .http
            .put(self.url("/me/player/play"))
            .query(&[("device_id", device_id)])
            .header(CONTENT_LENGTH, 0);

        self.send(request).await.map(|_| ())
    }

    async fn transfer_to(&self, device_id: &str) -> Result<(), CatalogError> {
        let body = TransferPlaybackRequest {
            device_ids: vec![device_id.to_string()],
            play: false,
        };
        let request = self.http.put(self.url("/me/player")).json(&body);

        self.send(request).await.map(|_| ())
    }
}
