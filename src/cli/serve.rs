use std::path::PathBuf;

use crate::{
    error, info,
    server::{self, AppState},
};

pub async fn serve(static_dir: Option<PathBuf>) {
    let state = match AppState::from_env() {
        Ok(state) => state,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if let Some(dir) = &static_dir {
        info!("Serving static files from {}", dir.display());
    }

    if let Err(e) = server::start_api_server(state, static_dir).await {
        error!("Server stopped: {}", e);
    }
}
