//! Image → analyzed aesthetic → collected tracks → published playlist.

use crate::{
    analyzer::AestheticAnalyzer,
    catalog::{CatalogMutation, SearchCapability},
    collector,
    error::PipelineError,
    publisher,
    types::GeneratedPlaylist,
};

/// Runs the three stages in order. The first failing stage ends the run.
pub async fn generate_playlist<A, C>(
    image: &[u8],
    analyzer: &A,
    catalog: &C,
    quota: usize,
) -> Result<GeneratedPlaylist, PipelineError>
where
    A: AestheticAnalyzer + ?Sized,
    C: SearchCapability + CatalogMutation,
{
    let aesthetic = analyzer.analyze(image).await?;
    let collection = collector::collect(&aesthetic, quota, catalog).await?;
    let playlist_id = publisher::publish(&collection, &aesthetic.description, catalog).await?;

    Ok(GeneratedPlaylist {
        playlist_id,
        description: aesthetic.description,
        tracks: collection.into_tracks(),
    })
}
