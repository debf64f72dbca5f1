use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::Client;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::TokenManager;
use crate::{info, playback::PlaybackController, types::Token};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "moodlist_sid";

/// Everything the server keeps for one logged-in browser.
pub struct Session {
    pub credentials: Arc<TokenManager>,
    pub player: Mutex<PlaybackController>,
}

struct Entry {
    session: Arc<Session>,
    last_seen: Instant,
}

/// In-memory sessions keyed by a random id. Sessions idle for longer than
/// the ttl are dropped on the next access.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
    http: Client,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(http: Client, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            http,
            ttl,
        }
    }

    /// Starts a session for a freshly authorized user and returns its id.
    pub async fn create(&self, token: Token) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Session {
            credentials: Arc::new(TokenManager::new(token, self.http.clone())),
            player: Mutex::new(PlaybackController::default()),
        });

        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);
        sessions.insert(
            id.clone(),
            Entry {
                session,
                last_seen: Instant::now(),
            },
        );
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);

        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.session))
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.lock().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn prune(&self, sessions: &mut HashMap<String, Entry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.ttl);

        let expired = before - sessions.len();
        if expired > 0 {
            info!("Expired {} idle sessions", expired);
        }
    }
}
