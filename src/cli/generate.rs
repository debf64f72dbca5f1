use std::{path::Path, sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    analyzer::OpenAiAnalyzer,
    config, error, info,
    management::TokenManager,
    pipeline,
    spotify::SpotifyClient,
    success,
    types::GeneratedPlaylist,
    utils,
};

pub async fn generate(image: &Path, quota: Option<usize>) {
    let image_bytes = match async_fs::read(image).await {
        Ok(bytes) => bytes,
        Err(e) => error!("Cannot read {}: {}", image.display(), e),
    };
    if image_bytes.is_empty() {
        error!("{} is empty", image.display());
    }

    let quota = match quota {
        Some(q) => config::clamp_quota(q),
        None => match config::track_quota() {
            Ok(q) => q,
            Err(e) => error!("{}", e),
        },
    };

    info!(
        "Analyzing {} ({} bytes), collecting up to {} tracks",
        image.display(),
        image_bytes.len(),
        quota
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Generating playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = run(&image_bytes, quota).await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => {
            success!(
                "Playlist {} created with {} tracks",
                playlist.playlist_id,
                playlist.tracks.len()
            );
            info!("{}", playlist.description);
            println!("{}", Table::new(utils::track_table_rows(&playlist.tracks)));
        }
        Err(e) => error!("Failed to generate playlist: {}", e),
    }
}

async fn run(image: &[u8], quota: usize) -> Res<GeneratedPlaylist> {
    let http = utils::http_client(config::http_timeout()?)?;
    let credentials = TokenManager::load(http.clone())
        .await
        .map_err(|e| format!("{}. Run `moodlist auth` first", e))?;

    let catalog = SpotifyClient::from_env(http.clone(), Arc::new(credentials));
    let analyzer = OpenAiAnalyzer::from_env(http)?;

    Ok(pipeline::generate_playlist(image, &analyzer, &catalog, quota).await?)
}
