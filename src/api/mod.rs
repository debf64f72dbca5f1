//! # API Module
//!
//! HTTP handlers of the moodlist server.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /auth/spotify`, redirects to Spotify's consent page
//! - [`callback`] - `GET /callback`, exchanges the code and opens a session
//! - [`check_auth`] - `GET /check-auth`
//! - [`get_token`] / [`refresh_token`] - access token for the player widget
//! - [`logout`] - `POST /logout`
//! - [`index`] - `GET /` without a frontend, redirects to `/check-auth`
//!
//! ### Playlist generation
//!
//! - [`upload`] - `POST /upload`, multipart `image` → `{playlistId, tracks}`
//!
//! ### Playback
//!
//! - [`player`] and `POST /player/*` - drive the session's playback
//!   controller and return its view
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`
//!
//! [`pkce_callback`] belongs to the short-lived callback server of the
//! terminal login, not to the main router.
//!
//! Handlers identify the caller by the session cookie and fail with
//! [`ApiError::Unauthorized`] when it is missing or expired.

mod auth;
mod callback;
mod error;
mod health;
mod player;
mod upload;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub use auth::{check_auth, get_token, index, login, logout, refresh_token};
pub use callback::{callback, pkce_callback};
pub use error::ApiError;
pub use health::health;
pub use player::{
    PlayerView, device as player_device, next as player_next, pause as player_pause,
    play as player_play, player, previous as player_previous,
    state_changed as player_state_changed, toggle as player_toggle,
};
pub use upload::upload;

use crate::{
    management::{SESSION_COOKIE, Session},
    server::AppState,
};

/// Short-lived cookie holding the OAuth `state` between login and callback.
pub const OAUTH_STATE_COOKIE: &str = "moodlist_oauth_state";

fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

async fn current_session(state: &AppState, jar: &CookieJar) -> Result<Arc<Session>, ApiError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    state
        .sessions
        .get(&session_id)
        .await
        .ok_or(ApiError::Unauthorized)
}
