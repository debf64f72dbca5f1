use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, management::TokenManager, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(shared_state).await {
        Ok(_) => success!(
            "Authentication successful. Token saved to {}",
            TokenManager::token_path().display()
        ),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
