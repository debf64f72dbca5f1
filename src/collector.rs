//! Turns an [`AestheticResult`] into a deduplicated list of tracks.
//!
//! Tracks are gathered in three tiers, always in this order:
//!
//! 1. one `artist:<name>` search per seed artist,
//! 2. one search per suggested search term,
//! 3. a single search for a phrase derived from the mood scores.
//!
//! Collection stops the moment the quota is reached, so later queries are
//! never issued once enough tracks were found. A failing query is logged and
//! skipped; only an empty final result is an error.

use std::{collections::HashSet, fmt};

use crate::{
    catalog::SearchCapability,
    error::CollectError,
    info,
    types::{AestheticResult, MoodProfile, Track},
    warning,
};

pub const DEFAULT_QUOTA: usize = 20;

/// Results requested per seed-artist and search-term query.
pub const TIER_SEARCH_LIMIT: u32 = 10;

/// Fallback phrase when the mood scores are all mid-range.
pub const NEUTRAL_MOOD_TERM: &str = "popular";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    SeedArtist,
    SearchTerm,
    Mood,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::SeedArtist => write!(f, "artist"),
            Tier::SearchTerm => write!(f, "term"),
            Tier::Mood => write!(f, "mood term"),
        }
    }
}

/// Insertion-ordered tracks, unique by id, never longer than its quota.
#[derive(Debug, Clone)]
pub struct TrackCollection {
    quota: usize,
    tracks: Vec<Track>,
    seen: HashSet<String>,
}

impl TrackCollection {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            tracks: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Appends `track` unless it is already present or the quota is met.
    /// Returns whether the track was added.
    pub fn push(&mut self, track: Track) -> bool {
        if self.is_full() || self.seen.contains(&track.id) {
            return false;
        }
        self.seen.insert(track.id.clone());
        self.tracks.push(track);
        true
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= self.quota
    }

    pub fn remaining(&self) -> usize {
        self.quota.saturating_sub(self.tracks.len())
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

/// Builds the free-text phrase used by the mood tier.
pub fn mood_phrase(mood: &MoodProfile) -> String {
    let mut terms: Vec<&str> = Vec::new();

    if mood.energy() > 0.7 {
        terms.push("energetic");
    } else if mood.energy() < 0.3 {
        terms.push("calm");
    }

    if mood.valence() > 0.7 {
        terms.push("happy");
    } else if mood.valence() < 0.3 {
        terms.push("sad");
    }

    if mood.acousticness() > 0.7 {
        terms.push("acoustic");
    }

    if terms.is_empty() {
        NEUTRAL_MOOD_TERM.to_string()
    } else {
        terms.join(" ")
    }
}

pub async fn collect<S>(
    aesthetic: &AestheticResult,
    quota: usize,
    search: &S,
) -> Result<TrackCollection, CollectError>
where
    S: SearchCapability + ?Sized,
{
    let mut collection = TrackCollection::new(quota);

    for artist in &aesthetic.seed_artists {
        if collection.is_full() {
            break;
        }
        let query = format!("artist:{}", artist);
        run_query(
            &mut collection,
            search,
            Tier::SeedArtist,
            artist,
            &query,
            TIER_SEARCH_LIMIT,
        )
        .await;
    }

    for term in &aesthetic.search_terms {
        if collection.is_full() {
            break;
        }
        run_query(
            &mut collection,
            search,
            Tier::SearchTerm,
            term,
            term,
            TIER_SEARCH_LIMIT,
        )
        .await;
    }

    if !collection.is_full() {
        let phrase = mood_phrase(&aesthetic.mood);
        let limit = u32::try_from(collection.remaining()).unwrap_or(u32::MAX);
        run_query(&mut collection, search, Tier::Mood, &phrase, &phrase, limit).await;
    }

    info!("Collected {} tracks for playlist", collection.len());

    if collection.is_empty() {
        return Err(CollectError::EmptyResult);
    }
    Ok(collection)
}

async fn run_query<S>(
    collection: &mut TrackCollection,
    search: &S,
    tier: Tier,
    label: &str,
    query: &str,
    limit: u32,
) where
    S: SearchCapability + ?Sized,
{
    let tracks = match search.search(query, limit).await {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Search for {} \"{}\" failed: {}", tier, label, e);
            return;
        }
    };

    for track in tracks {
        if collection.is_full() {
            break;
        }
        collection.push(track);
    }
}
