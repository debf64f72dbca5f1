use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{
    error::{
        AnalyzerError, AuthError, CollectError, ConfigError, PipelineError, PlaybackError,
    },
    warning,
};

/// Error returned by every handler; rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(e) => match e {
                AuthError::NotAuthenticated | AuthError::MissingRefreshToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Rejected(_) => StatusCode::BAD_REQUEST,
                AuthError::Transport(_) => StatusCode::BAD_GATEWAY,
                AuthError::Storage(_) | AuthError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Pipeline(e) => match e {
                PipelineError::Analyzer(AnalyzerError::Config(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                PipelineError::Analyzer(AnalyzerError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
                PipelineError::Analyzer(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Collect(CollectError::EmptyResult) => StatusCode::NOT_FOUND,
                PipelineError::Publish(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Playback(e) => match e {
                PlaybackError::DeviceNotReady => StatusCode::CONFLICT,
                PlaybackError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
                PlaybackError::TrackNotFound { .. } => StatusCode::NOT_FOUND,
                PlaybackError::Command(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warning!("Request failed ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
