use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use axum_extra::extract::cookie::CookieJar;

use super::{ApiError, current_session};
use crate::{info, pipeline, server::AppState, success, types::GeneratedPlaylist};

/// Multipart field holding the image.
const IMAGE_FIELD: &str = "image";

pub async fn upload(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Json<GeneratedPlaylist>, ApiError> {
    let session = current_session(&state, &jar).await?;
    let image = read_image(&mut multipart).await?;
    info!("Received image of {} bytes", image.len());

    let catalog = state.catalog_for(&session);
    let playlist =
        pipeline::generate_playlist(&image, state.analyzer.as_ref(), &catalog, state.quota)
            .await?;

    session
        .player
        .lock()
        .await
        .load_tracks(playlist.tracks.clone());

    success!(
        "Playlist {} ready with {} tracks",
        playlist.playlist_id,
        playlist.tracks.len()
    );
    Ok(Json(playlist))
}

async fn read_image(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Uploaded image is empty".to_string()));
        }
        return Ok(bytes);
    }

    Err(ApiError::BadRequest("No image uploaded".to_string()))
}
