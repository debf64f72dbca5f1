use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::MoodError;

/// Seconds before expiry at which a token is treated as expired.
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + TOKEN_EXPIRY_MARGIN_SECS >= self.obtained_at + self.expires_in
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Raw token endpoint payload. Refresh responses may omit the refresh token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// Four aesthetic scores, each within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoodScores")]
pub struct MoodProfile {
    energy: f64,
    valence: f64,
    danceability: f64,
    acousticness: f64,
}

#[derive(Deserialize)]
struct MoodScores {
    energy: f64,
    valence: f64,
    danceability: f64,
    acousticness: f64,
}

impl MoodProfile {
    pub fn new(
        energy: f64,
        valence: f64,
        danceability: f64,
        acousticness: f64,
    ) -> Result<Self, MoodError> {
        for (field, value) in [
            ("energy", energy),
            ("valence", valence),
            ("danceability", danceability),
            ("acousticness", acousticness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MoodError::OutOfRange { field, value });
            }
        }

        Ok(Self {
            energy,
            valence,
            danceability,
            acousticness,
        })
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn valence(&self) -> f64 {
        self.valence
    }

    pub fn danceability(&self) -> f64 {
        self.danceability
    }

    pub fn acousticness(&self) -> f64 {
        self.acousticness
    }
}

impl TryFrom<MoodScores> for MoodProfile {
    type Error = MoodError;

    fn try_from(s: MoodScores) -> Result<Self, Self::Error> {
        MoodProfile::new(s.energy, s.valence, s.danceability, s.acousticness)
    }
}

/// What the analyzer reads out of an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AestheticResult {
    pub mood: MoodProfile,
    pub search_terms: Vec<String>,
    pub seed_artists: Vec<String>,
    pub description: String,
}

/// A playable catalog track. Two tracks are the same track iff their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub uri: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
}

/// Outcome of one image → playlist run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlaylist {
    pub playlist_id: String,
    pub description: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TracksPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<Option<SpotifyTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

impl From<SpotifyTrack> for Track {
    fn from(t: SpotifyTrack) -> Self {
        Track {
            id: t.id,
            name: t.name,
            artist: t
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            uri: t.uri,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlaybackRequest {
    pub device_ids: Vec<String>,
    pub play: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
}
