use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};

use super::{ApiError, OAUTH_STATE_COOKIE, current_session};
use crate::{
    config,
    error::ConfigError,
    management::{AuthSession, SESSION_COOKIE},
    server::AppState,
    spotify, utils,
};

/// Redirects the browser to Spotify's consent page.
pub async fn login(jar: CookieJar) -> Result<(CookieJar, Redirect), ApiError> {
    if config::spotify_client_secret().is_none() {
        return Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_SECRET").into());
    }

    let csrf = utils::random_token(32);
    let url = spotify::auth::authorize_url(None, Some(&csrf))?;
    let cookie = Cookie::build((OAUTH_STATE_COOKIE, csrf))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Redirect::to(&url)))
}

/// Landing route when no frontend is served; the login callback ends here.
pub async fn index() -> Redirect {
    Redirect::to("/check-auth")
}

pub async fn check_auth(State(state): State<AppState>, jar: CookieJar) -> Json<Value> {
    let authenticated = current_session(&state, &jar).await.is_ok();
    Json(json!({ "authenticated": authenticated }))
}

/// Access token for the browser's player widget.
pub async fn get_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let access_token = session.credentials.access_token().await?;
    Ok(Json(json!({ "accessToken": access_token })))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let access_token = session.credentials.refresh().await?;
    Ok(Json(json!({
        "success": true,
        "newTokenFirstChars": utils::mask_token(&access_token),
    })))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let session_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    if let Some(id) = session_id {
        state.sessions.remove(&id).await;
    }
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}
