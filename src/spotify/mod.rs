//! # Spotify Integration Module
//!
//! HTTP client for the parts of the Spotify Web API moodlist needs. The
//! [`SpotifyClient`] implements the catalog capabilities the core works
//! against:
//!
//! ```text
//! Collector / Publisher / PlaybackController
//!          ↓
//! SearchCapability · CatalogMutation · PlaybackDevice
//!          ↓
//! SpotifyClient (reqwest, JSON, bearer token from an AuthSession)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - authorize URLs, code exchange, token refresh and the
//!   terminal PKCE login
//! - [`search`] - `GET /search`
//! - [`playlist`] - `GET /me`, playlist creation and track adds
//! - [`player`] - Connect playback commands (`/me/player/*`)
//!
//! ## Error Handling
//!
//! Every non-2xx answer becomes [`CatalogError::Status`] carrying the body
//! Spotify sent. Nothing is retried here; callers decide what a failure
//! means. Request timeouts come from the shared `reqwest::Client`.

pub mod auth;
mod player;
mod playlist;
mod search;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{config, error::CatalogError, management::AuthSession};

#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    auth: Arc<dyn AuthSession>,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, auth: Arc<dyn AuthSession>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            auth,
        }
    }

    pub fn from_env(http: Client, auth: Arc<dyn AuthSession>) -> Self {
        Self::new(http, config::spotify_apiurl(), auth)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends `request` with the session's bearer token and rejects non-2xx
    /// answers.
    async fn send(&self, request: RequestBuilder) -> Result<Response, CatalogError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CatalogError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}
