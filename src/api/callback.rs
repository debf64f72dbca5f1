use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{ApiError, OAUTH_STATE_COOKIE, session_cookie};
use crate::{
    info, server::AppState, spotify, success, types::PkceToken, utils, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Browser login callback: checks the OAuth `state`, exchanges the code and
/// opens a session.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(error) = params.error {
        warning!("Error response from Spotify: {}", error);
        return Err(ApiError::BadRequest(format!(
            "Authorization failed: {}",
            error
        )));
    }

    let Some(code) = params.code else {
        return Err(ApiError::BadRequest(
            "Authorization failed: No code received".to_string(),
        ));
    };

    let expected = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    if expected.is_none() || expected != params.state {
        warning!("Rejected callback with a mismatching state");
        return Err(ApiError::BadRequest(
            "Authorization failed: state mismatch".to_string(),
        ));
    }

    let token = spotify::auth::exchange_code(&state.http, &code, None).await?;
    info!(
        "Received access token {}",
        utils::mask_token(&token.access_token)
    );

    let session_id = state.sessions.create(token).await;
    let jar = jar
        .remove(Cookie::build(OAUTH_STATE_COOKIE).path("/"))
        .add(session_cookie(session_id));

    Ok((jar, Redirect::to("/")))
}

/// Callback for the terminal login. Hands the token to the waiting
/// `moodlist auth` through the shared PKCE state.
pub async fn pkce_callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
    Extension(http): Extension<Client>,
) -> Html<&'static str> {
    let Some(code) = params.code else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    match spotify::auth::exchange_code(&http, &code, Some(pkce_state.code_verifier.as_str())).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            success!("Authorization code exchanged");
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
