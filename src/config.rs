//! Configuration management for moodlist.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/moodlist/.env`)
//! 4. Defaults below, where a sensible one exists
//!
//! Credentials have no default; asking for a missing one yields
//! [`ConfigError::Missing`].

use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const DEFAULT_SCOPE: &str =
    "streaming playlist-modify-private user-read-private user-modify-playback-state";
pub const DEFAULT_TRACK_QUOTA: usize = 20;
/// Upper bound of the quota: the mood tier asks the search endpoint for up to
/// `quota` results, and Spotify caps a search page at 50.
pub const MAX_TRACK_QUOTA: usize = 50;

/// Returns the directory holding moodlist's `.env`, token cache and templates.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist");
    path
}

/// Loads `.env` files into the process environment.
///
/// Creates the data directory if needed. Missing `.env` files are not an
/// error; a present but unreadable one is.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    // dotenv never overrides variables that are already set, so the working
    // directory file must be loaded first to win over the data dir one.
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T: std::str::FromStr>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        None => Ok(default),
    }
}

/// Address the HTTP server binds to, e.g. `127.0.0.1:3000`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret of the Spotify application.
///
/// When present the web login exchanges codes with HTTP Basic client
/// authentication; without it only the PKCE flow works.
pub fn spotify_client_secret() -> Option<String> {
    optional("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Must match a redirect URI registered with the Spotify application.
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

pub fn spotify_apitoken_url() -> String {
    or_default(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

pub fn openai_api_key() -> Result<String, ConfigError> {
    required("OPENAI_API_KEY")
}

pub fn openai_api_url() -> String {
    or_default("OPENAI_API_URL", "https://api.openai.com/v1")
}

pub fn openai_model() -> String {
    or_default("OPENAI_MODEL", "gpt-4o")
}

/// Tracks per generated playlist, clamped to `1..=MAX_TRACK_QUOTA`.
pub fn track_quota() -> Result<usize, ConfigError> {
    parse_or_default("TRACK_QUOTA", DEFAULT_TRACK_QUOTA).map(clamp_quota)
}

pub fn clamp_quota(quota: usize) -> usize {
    quota.clamp(1, MAX_TRACK_QUOTA)
}

/// Timeout applied to every outbound HTTP request.
pub fn http_timeout() -> Result<Duration, ConfigError> {
    parse_or_default("HTTP_TIMEOUT_SECS", 30u64).map(Duration::from_secs)
}

/// How long an idle web session is kept.
pub fn session_ttl() -> Result<Duration, ConfigError> {
    parse_or_default("SESSION_TTL_SECS", 86_400u64).map(Duration::from_secs)
}

/// Directory with the browser frontend, if one should be served.
pub fn static_dir() -> Option<PathBuf> {
    optional("STATIC_DIR").map(PathBuf::from)
}
