//! Endpoints the browser player widget reports to and is steered from.
//!
//! Every handler answers with the resulting [`PlayerView`].

use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::{ApiError, current_session};
use crate::{
    playback::{PlaybackController, PlaybackState, PlaybackStatus},
    server::AppState,
    types::Track,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    status: PlaybackStatus,
    #[serde(flatten)]
    state: PlaybackState,
    device_id: Option<String>,
    current_track: Option<Track>,
    tracks: Vec<Track>,
}

impl PlayerView {
    fn of(player: &PlaybackController) -> Self {
        Self {
            status: player.status(),
            state: player.state(),
            device_id: player.device_id().map(str::to_string),
            current_track: player.current_track().cloned(),
            tracks: player.tracks().to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEvent {
    device_id: String,
    #[serde(default = "default_ready")]
    ready: bool,
}

fn default_ready() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    index: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    track_name: String,
    artist_name: String,
    paused: bool,
}

pub async fn player(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let player = session.player.lock().await;
    Ok(Json(PlayerView::of(&player)))
}

pub async fn device(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(event): Json<DeviceEvent>,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    if event.ready {
        player.device_ready(&event.device_id, &catalog).await;
    } else {
        player.device_not_ready(&event.device_id);
    }
    Ok(Json(PlayerView::of(&player)))
}

pub async fn play(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<PlayRequest>,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    player.play(request.index, &catalog).await?;
    Ok(Json(PlayerView::of(&player)))
}

pub async fn pause(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    player.pause(&catalog).await?;
    Ok(Json(PlayerView::of(&player)))
}

pub async fn toggle(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    player.toggle_play_pause(&catalog).await?;
    Ok(Json(PlayerView::of(&player)))
}

pub async fn next(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    player.next(&catalog).await?;
    Ok(Json(PlayerView::of(&player)))
}

pub async fn previous(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let catalog = state.catalog_for(&session);
    let mut player = session.player.lock().await;

    player.previous(&catalog).await?;
    Ok(Json(PlayerView::of(&player)))
}

/// The widget's `player_state_changed` event.
pub async fn state_changed(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(change): Json<StateChange>,
) -> Result<Json<PlayerView>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let mut player = session.player.lock().await;

    player.external_state_changed(&change.track_name, &change.artist_name, change.paused);
    Ok(Json(PlayerView::of(&player)))
}
