use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config, error::AuthError, spotify, types::Token, warning};

/// Source of the bearer credential for catalog calls.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Current access token, refreshed first if it is about to expire.
    async fn access_token(&self) -> Result<String, AuthError>;

    /// Forces a refresh and returns the new access token.
    async fn refresh(&self) -> Result<String, AuthError>;
}

/// Holds one Spotify token and refreshes it before it expires.
///
/// Web sessions keep their manager in memory only. The terminal client
/// attaches the on-disk cache so a token survives between runs.
pub struct TokenManager {
    token: Mutex<Token>,
    http: Client,
    cache_path: Option<PathBuf>,
}

impl TokenManager {
    pub fn new(token: Token, http: Client) -> Self {
        TokenManager {
            token: Mutex::new(token),
            http,
            cache_path: None,
        }
    }

    /// Persists the token to the cache file whenever it changes.
    pub fn with_cache(mut self) -> Self {
        self.cache_path = Some(Self::token_path());
        self
    }

    pub async fn load(http: Client) -> Result<Self, AuthError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(Self::new(token, http).with_cache())
    }

    pub async fn persist(&self) -> Result<(), AuthError> {
        let Some(path) = &self.cache_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&*self.token.lock().await)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    pub async fn current_token(&self) -> Token {
        self.token.lock().await.clone()
    }

    pub fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }
}

#[async_trait]
impl AuthSession for TokenManager {
    async fn access_token(&self) -> Result<String, AuthError> {
        {
            let token = self.token.lock().await;
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }
        self.refresh().await
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let access_token = {
            let mut token = self.token.lock().await;
            let fresh = spotify::auth::refresh_token(&self.http, &token.refresh_token).await?;
            *token = fresh;
            token.access_token.clone()
        };

        if let Err(e) = self.persist().await {
            warning!("Failed to save token to cache: {}", e);
        }
        Ok(access_token)
    }
}
