#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use moodlist::{
    analyzer::AestheticAnalyzer,
    catalog::{CatalogMutation, PlaybackDevice, SearchCapability},
    error::{AnalyzerError, CatalogError, SearchError},
    types::{AestheticResult, MoodProfile, Track},
};

pub const USER_ID: &str = "user-1";
pub const PLAYLIST_ID: &str = "playlist-1";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { query: String, limit: u32 },
    CurrentUser,
    CreatePlaylist {
        owner_id: String,
        name: String,
        description: String,
        public: bool,
    },
    AddTracks { playlist_id: String, uris: Vec<String> },
    Play { device_id: String, uri: String },
    Pause(String),
    Resume(String),
    Transfer(String),
}

/// In-memory catalog answering searches from a fixed table and recording
/// every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    results: HashMap<String, Vec<Track>>,
    failing: HashSet<String>,
    pub fail_user: bool,
    pub fail_add: bool,
    pub fail_play: bool,
    pub fail_pause: bool,
    pub fail_resume: bool,
    pub fail_transfer: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, tracks: Vec<Track>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Makes every track findable by the `track:<name> artist:<artist>` query.
    pub fn with_playable(mut self, tracks: &[Track]) -> Self {
        for t in tracks {
            let query = format!("track:{} artist:{}", t.name, t.artist);
            self.results.insert(query, vec![t.clone()]);
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn failure(message: &str) -> CatalogError {
    CatalogError::Status {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl SearchCapability for FakeCatalog {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Track>, SearchError> {
        self.record(Call::Search {
            query: query.to_string(),
            limit,
        });
        if self.failing.contains(query) {
            return Err(failure("search failed"));
        }
        Ok(self
            .results
            .get(query)
            .map(|tracks| tracks.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogMutation for FakeCatalog {
    async fn current_user_id(&self) -> Result<String, CatalogError> {
        self.record(Call::CurrentUser);
        if self.fail_user {
            return Err(failure("no profile"));
        }
        Ok(USER_ID.to_string())
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String, CatalogError> {
        self.record(Call::CreatePlaylist {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            public,
        });
        Ok(PLAYLIST_ID.to_string())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        self.record(Call::AddTracks {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        if self.fail_add {
            return Err(failure("add failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackDevice for FakeCatalog {
    async fn play(&self, device_id: &str, uri: &str) -> Result<(), CatalogError> {
        self.record(Call::Play {
            device_id: device_id.to_string(),
            uri: uri.to_string(),
        });
        if self.fail_play {
            return Err(failure("play failed"));
        }
        Ok(())
    }

    async fn pause(&self, device_id: &str) -> Result<(), CatalogError> {
        self.record(Call::Pause(device_id.to_string()));
        if self.fail_pause {
            return Err(failure("pause failed"));
        }
        Ok(())
    }

    async fn resume(&self, device_id: &str) -> Result<(), CatalogError> {
        self.record(Call::Resume(device_id.to_string()));
        if self.fail_resume {
            return Err(failure("resume failed"));
        }
        Ok(())
    }

    async fn transfer_to(&self, device_id: &str) -> Result<(), CatalogError> {
        self.record(Call::Transfer(device_id.to_string()));
        if self.fail_transfer {
            return Err(failure("transfer failed"));
        }
        Ok(())
    }
}

/// Analyzer returning a canned answer.
pub struct FakeAnalyzer {
    result: Option<AestheticResult>,
}

impl FakeAnalyzer {
    pub fn answering(result: AestheticResult) -> Self {
        Self {
            result: Some(result),
        }
    }

    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl AestheticAnalyzer for FakeAnalyzer {
    async fn analyze(&self, _image: &[u8]) -> Result<AestheticResult, AnalyzerError> {
        self.result
            .clone()
            .ok_or_else(|| AnalyzerError::Connection("analyzer unreachable".to_string()))
    }
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Song {}", id),
        artist: format!("Artist {}", id),
        uri: format!("spotify:track:{}", id),
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn neutral_mood() -> MoodProfile {
    MoodProfile::new(0.5, 0.5, 0.5, 0.5).unwrap()
}

pub fn aesthetic(seed_artists: &[&str], search_terms: &[&str]) -> AestheticResult {
    AestheticResult {
        mood: neutral_mood(),
        search_terms: search_terms.iter().map(|s| s.to_string()).collect(),
        seed_artists: seed_artists.iter().map(|s| s.to_string()).collect(),
        description: "Warm evening light over a quiet harbor".to_string(),
    }
}
