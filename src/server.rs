use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use reqwest::Client;
use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

use crate::{
    Res,
    analyzer::{AestheticAnalyzer, OpenAiAnalyzer},
    api, config, info,
    management::{Session, SessionStore},
    spotify::SpotifyClient,
    types::PkceToken,
    utils,
};

/// Largest accepted upload body.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared by every handler of the main server.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub http: Client,
    pub analyzer: Arc<dyn AestheticAnalyzer>,
    pub api_url: String,
    pub quota: usize,
}

impl AppState {
    pub fn from_env() -> Res<Self> {
        // fail at startup rather than on the first login
        config::spotify_client_id()?;

        let http = utils::http_client(config::http_timeout()?)?;
        let analyzer = OpenAiAnalyzer::from_env(http.clone())?;

        Ok(Self {
            sessions: SessionStore::new(http.clone(), config::session_ttl()?),
            http,
            analyzer: Arc::new(analyzer),
            api_url: config::spotify_apiurl(),
            quota: config::track_quota()?,
        })
    }

    /// Catalog client acting with the credentials of `session`.
    pub fn catalog_for(&self, session: &Session) -> SpotifyClient {
        SpotifyClient::new(
            self.http.clone(),
            self.api_url.clone(),
            session.credentials.clone(),
        )
    }
}

pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/auth/spotify", get(api::login))
        .route("/callback", get(api::callback))
        .route("/check-auth", get(api::check_auth))
        .route("/get-token", get(api::get_token))
        .route("/refresh-token", get(api::refresh_token))
        .route("/logout", post(api::logout))
        .route(
            "/upload",
            post(api::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/player", get(api::player))
        .route("/player/device", post(api::player_device))
        .route("/player/play", post(api::player_play))
        .route("/player/pause", post(api::player_pause))
        .route("/player/toggle", post(api::player_toggle))
        .route("/player/next", post(api::player_next))
        .route("/player/previous", post(api::player_previous))
        .route("/player/state", post(api::player_state_changed))
        .with_state(state);

    // the login callback redirects to `/`
    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(api::index)),
    }
}

pub async fn start_api_server(state: AppState, static_dir: Option<PathBuf>) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    let app = router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serves only `/callback` for the terminal login flow.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>, http: Client) -> Res<()> {
    let app = Router::new().route(
        "/callback",
        get(api::pkce_callback)
            .layer::<_, std::convert::Infallible>(Extension(state))
            .layer(Extension(http)),
    );

    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
