//! Saves a collected track list as a private playlist.

use crate::{
    catalog::CatalogMutation, collector::TrackCollection, error::PublishError, info, success,
    warning,
};

pub const PLAYLIST_NAME: &str = "Aesthetic Playlist from Image";

pub fn playlist_description(description: &str) -> String {
    format!("Based on the image aesthetic: {}", description)
}

/// Creates the playlist and adds every track, in collection order, in one call.
///
/// Nothing is rolled back: if adding tracks fails the empty playlist stays in
/// the account and the error carries its id.
pub async fn publish<C>(
    tracks: &TrackCollection,
    description: &str,
    catalog: &C,
) -> Result<String, PublishError>
where
    C: CatalogMutation + ?Sized,
{
    let owner_id = catalog
        .current_user_id()
        .await
        .map_err(PublishError::Owner)?;

    let playlist_id = catalog
        .create_playlist(
            &owner_id,
            PLAYLIST_NAME,
            &playlist_description(description),
            false,
        )
        .await
        .map_err(PublishError::Create)?;
    info!("Created playlist {}", playlist_id);

    if let Err(source) = catalog.add_tracks(&playlist_id, &tracks.uris()).await {
        warning!(
            "Playlist {} left without tracks after a failed add: {}",
            playlist_id,
            source
        );
        return Err(PublishError::AddTracks {
            playlist_id,
            source,
        });
    }

    success!("Added {} tracks to playlist {}", tracks.len(), playlist_id);
    Ok(playlist_id)
}
