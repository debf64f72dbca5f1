mod common;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use common::FakeAnalyzer;
use moodlist::{
    api::{ApiError, OAUTH_STATE_COOKIE},
    error::{
        AnalyzerError, AuthError, CatalogError, CollectError, ConfigError, PipelineError,
        PlaybackError, PublishError,
    },
    management::{SESSION_COOKIE, SessionStore},
    server::{AppState, router},
    types::Token,
};
use reqwest::Client;
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "moodlist-boundary";

fn app_state() -> AppState {
    AppState {
        sessions: SessionStore::new(Client::new(), Duration::from_secs(3600)),
        http: Client::new(),
        analyzer: Arc::new(FakeAnalyzer::failing()),
        api_url: "http://127.0.0.1:9".to_string(),
        quota: 20,
    }
}

fn token() -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "streaming".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

fn catalog_error() -> CatalogError {
    CatalogError::Status {
        status: 500,
        message: "boom".to_string(),
    }
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_request(cookie: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

#[test]
fn test_error_status_mapping() {
    let cases: Vec<(ApiError, StatusCode)> = vec![
        (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        (
            ApiError::BadRequest("no image".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            ConfigError::Missing("OPENAI_API_KEY").into(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AuthError::NotAuthenticated.into(),
            StatusCode::UNAUTHORIZED,
        ),
        (
            AuthError::Rejected("invalid_grant".to_string()).into(),
            StatusCode::BAD_REQUEST,
        ),
        (
            PipelineError::from(AnalyzerError::Timeout).into(),
            StatusCode::GATEWAY_TIMEOUT,
        ),
        (
            PipelineError::from(AnalyzerError::Malformed("x".to_string())).into(),
            StatusCode::BAD_GATEWAY,
        ),
        (
            PipelineError::from(AnalyzerError::Config(ConfigError::Missing("OPENAI_API_KEY")))
                .into(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            PipelineError::from(CollectError::EmptyResult).into(),
            StatusCode::NOT_FOUND,
        ),
        (
            PipelineError::from(PublishError::Create(catalog_error())).into(),
            StatusCode::BAD_GATEWAY,
        ),
        (
            PipelineError::from(PublishError::AddTracks {
                playlist_id: "p1".to_string(),
                source: catalog_error(),
            })
            .into(),
            StatusCode::BAD_GATEWAY,
        ),
        (
            PlaybackError::DeviceNotReady.into(),
            StatusCode::CONFLICT,
        ),
        (
            PlaybackError::InvalidIndex { index: -1, len: 3 }.into(),
            StatusCode::BAD_REQUEST,
        ),
        (
            PlaybackError::TrackNotFound {
                name: "Song".to_string(),
                artist: "Artist".to_string(),
            }
            .into(),
            StatusCode::NOT_FOUND,
        ),
        (
            PlaybackError::Command(catalog_error()).into(),
            StatusCode::BAD_GATEWAY,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status(), expected, "status of {:?}", error);
    }
}

#[tokio::test]
async fn test_check_auth_without_session() {
    let app = router(app_state(), None);
    let request = Request::builder()
        .uri("/check-auth")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["authenticated"], false);
}

#[tokio::test]
async fn test_check_auth_with_session() {
    let state = app_state();
    let session_id = state.sessions.create(token()).await;
    let app = router(state, None);
    let request = Request::builder()
        .uri("/check-auth")
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, session_id))
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(json_body(response).await["authenticated"], true);
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = router(app_state(), None);
    let body = format!("--{}--\r\n", BOUNDARY);

    let response = send(app, multipart_request(None, body)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Not authenticated");
}

#[tokio::test]
async fn test_upload_without_image_field_is_rejected() {
    let state = app_state();
    let session_id = state.sessions.create(token()).await;
    let app = router(state, None);
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = BOUNDARY
    );
    let cookie = format!("{}={}", SESSION_COOKIE, session_id);

    let response = send(app, multipart_request(Some(&cookie), body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No image uploaded");
}

#[tokio::test]
async fn test_callback_rejects_mismatching_state() {
    let app = router(app_state(), None);
    let request = Request::builder()
        .uri("/callback?code=abc&state=forged")
        .header(
            header::COOKIE,
            format!("{}={}", OAUTH_STATE_COOKIE, "expected"),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_callback_rejects_missing_state_cookie() {
    let state = app_state();
    let sessions = state.sessions.clone();
    let app = router(state, None);
    let request = Request::builder()
        .uri("/callback?code=abc&state=whatever")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(sessions.len().await, 0);
}

#[tokio::test]
async fn test_callback_reports_denied_consent() {
    let app = router(app_state(), None);
    let request = Request::builder()
        .uri("/callback?error=access_denied")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_root_redirects_without_frontend() {
    let app = router(app_state(), None);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/check-auth"
    );
}

#[tokio::test]
async fn test_player_view_and_logout() {
    let state = app_state();
    let sessions = state.sessions.clone();
    let session_id = state.sessions.create(token()).await;
    let app = router(state, None);
    let cookie = format!("{}={}", SESSION_COOKIE, session_id);

    let request = Request::builder()
        .uri("/player")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(app.clone(), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = json_body(response).await;
    assert_eq!(view["status"], "no_device");
    assert_eq!(view["playing"], false);

    let request = Request::builder()
        .method("POST")
        .uri("/player/toggle")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(app.clone(), request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(sessions.len().await, 0);
}
