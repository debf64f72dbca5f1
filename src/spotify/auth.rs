use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{AuthError, ConfigError},
    info,
    management::TokenManager,
    server::start_callback_server,
    types::{PkceToken, Token, TokenErrorResponse, TokenResponse},
    utils, warning,
};

/// How long the terminal login waits for the browser round trip.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the Spotify authorization URL.
///
/// `code_challenge` switches the request to PKCE (S256); `state` is echoed
/// back to the callback and used for CSRF protection by the web login.
pub fn authorize_url(
    code_challenge: Option<&str>,
    state: Option<&str>,
) -> Result<String, ConfigError> {
    let mut url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        spotify_auth_url = config::spotify_apiauth_url(),
        client_id = urlencoding::encode(&config::spotify_client_id()?),
        redirect_uri = urlencoding::encode(&config::spotify_redirect_uri()),
        scope = urlencoding::encode(&config::spotify_scope()),
    );

    if let Some(challenge) = code_challenge {
        url.push_str(&format!(
            "&code_challenge={}&code_challenge_method=S256",
            challenge
        ));
    }
    if let Some(state) = state {
        url.push_str(&format!("&state={}", urlencoding::encode(state)));
    }

    Ok(url)
}

/// Runs the terminal login: local callback server, browser, PKCE exchange.
/// The obtained token is persisted for later `generate` runs.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token, AuthError> {
    let http = utils::http_client(config::http_timeout()?)?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let auth_url = authorize_url(Some(&code_challenge), None)?;

    // store verifier before anyone can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server_http = http.clone();
    tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_state, server_http).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or(AuthError::NotAuthenticated)?;

    TokenManager::new(token.clone(), http)
        .with_cache()
        .persist()
        .await?;

    Ok(token)
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
///
/// With a `verifier` the exchange is a PKCE one; otherwise the client
/// secret authenticates the request.
pub async fn exchange_code(
    http: &Client,
    code: &str,
    verifier: Option<&str>,
) -> Result<Token, AuthError> {
    let redirect_uri = config::spotify_redirect_uri();
    let mut form = vec![
        ("grant_type", "authorization_code".to_string()),
        ("code", code.to_string()),
        ("redirect_uri", redirect_uri),
    ];
    if let Some(verifier) = verifier {
        form.push(("client_id", config::spotify_client_id()?));
        form.push(("code_verifier", verifier.to_string()));
    }

    let response = token_request(http, &form).await?;
    let refresh_token = response.refresh_token.clone().unwrap_or_default();
    Ok(into_token(response, refresh_token))
}

/// Trades a refresh token for a fresh access token. Spotify may rotate the
/// refresh token; when it does not, the old one is kept.
pub async fn refresh_token(http: &Client, refresh_token: &str) -> Result<Token, AuthError> {
    if refresh_token.is_empty() {
        return Err(AuthError::MissingRefreshToken);
    }

    let mut form = vec![
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.to_string()),
    ];
    if config::spotify_client_secret().is_none() {
        form.push(("client_id", config::spotify_client_id()?));
    }

    let response = token_request(http, &form).await?;
    let next_refresh = response
        .refresh_token
        .clone()
        .unwrap_or_else(|| refresh_token.to_string());
    info!("Token refreshed successfully");
    Ok(into_token(response, next_refresh))
}

async fn token_request(
    http: &Client,
    form: &[(&str, String)],
) -> Result<TokenResponse, AuthError> {
    let mut request = http.post(config::spotify_apitoken_url()).form(form);
    if let Some(secret) = config::spotify_client_secret() {
        request = request.basic_auth(config::spotify_client_id()?, Some(secret));
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => err.error_description.unwrap_or(err.error),
            Err(_) => format!("{}: {}", status, body),
        };
        return Err(AuthError::Rejected(reason));
    }

    Ok(response.json::<TokenResponse>().await?)
}

fn into_token(response: TokenResponse, refresh_token: String) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token,
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
