use async_trait::async_trait;

use super::SpotifyClient;
use crate::{
    catalog::SearchCapability,
    error::SearchError,
    types::{SearchResponse, Track},
};

/// Largest page the search endpoint serves.
const MAX_SEARCH_LIMIT: u32 = 50;

#[async_trait]
impl SearchCapability for SpotifyClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Track>, SearchError> {
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();
        let request = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())]);

        let response: SearchResponse = self.send_json(request).await?;

        Ok(response
            .tracks
            .map(|page| page.items.into_iter().flatten().map(Track::from).collect())
            .unwrap_or_default())
    }
}
