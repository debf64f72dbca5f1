//! Playback state machine for one listener.
//!
//! The browser widget reports device readiness and track changes; users ask
//! to play, pause and skip. Both arrive here as explicit transitions on a
//! [`PlaybackController`], which issues the matching device commands and only
//! updates its state once a command succeeded.
//!
//! ```text
//!   NoDevice --device_ready--> DeviceReady --play--> Playing <--> Paused
//!      ^                                                 |
//!      +------------------- device_not_ready ------------+
//! ```

use serde::Serialize;

use crate::{
    catalog::{PlaybackDevice, SearchCapability},
    error::PlaybackError,
    info,
    types::Track,
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    NoDevice,
    DeviceReady,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// `None` until a track has been selected.
    pub current_index: Option<usize>,
    pub playing: bool,
    pub device_ready: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    tracks: Vec<Track>,
    state: PlaybackState,
    device_id: Option<String>,
}

impl PlaybackController {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn status(&self) -> PlaybackStatus {
        match (self.state.device_ready, self.state.playing, self.state.current_index) {
            (false, _, _) => PlaybackStatus::NoDevice,
            (true, true, _) => PlaybackStatus::Playing,
            (true, false, Some(_)) => PlaybackStatus::Paused,
            (true, false, None) => PlaybackStatus::DeviceReady,
        }
    }

    /// Replaces the playlist. The device registration survives.
    pub fn load_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.state.current_index = None;
        self.state.playing = false;
    }

    /// Registers the player device. Playback is transferred to a device the
    /// first time it is seen; a failed transfer is only logged.
    pub async fn device_ready<D>(&mut self, device_id: &str, device: &D)
    where
        D: PlaybackDevice + ?Sized,
    {
        info!("Player ready with device id {}", device_id);

        let is_new = self.device_id.as_deref() != Some(device_id);
        self.device_id = Some(device_id.to_string());
        self.state.device_ready = true;
        self.state.playing = false;

        if is_new {
            match device.transfer_to(device_id).await {
                Ok(()) => info!("Playback transferred to device {}", device_id),
                Err(e) => warning!("Error transferring playback: {}", e),
            }
        }
    }

    pub fn device_not_ready(&mut self, device_id: &str) {
        if self.device_id.as_deref() != Some(device_id) {
            return;
        }
        info!("Device {} has gone offline", device_id);
        self.device_id = None;
        self.state.device_ready = false;
        self.state.playing = false;
    }

    /// Plays the track at `index`, resolving its URI through a name + artist
    /// search first.
    pub async fn play<C>(&mut self, index: i64, catalog: &C) -> Result<(), PlaybackError>
    where
        C: SearchCapability + PlaybackDevice,
    {
        let position = self.checked_index(index)?;
        let device_id = self
            .device_id
            .clone()
            .ok_or(PlaybackError::DeviceNotReady)?;

        let track = &self.tracks[position];
        let query = format!("track:{} artist:{}", track.name, track.artist);
        let found = catalog.search(&query, 1).await.map_err(|e| {
            warning!("Search for \"{}\" failed: {}", track.name, e);
            PlaybackError::from(e)
        })?;
        let Some(uri) = found.into_iter().next().map(|t| t.uri) else {
            warning!("Track not found: \"{}\" by {}", track.name, track.artist);
            return Err(PlaybackError::TrackNotFound {
                name: track.name.clone(),
                artist: track.artist.clone(),
            });
        };

        catalog.play(&device_id, &uri).await.map_err(|e| {
            warning!("Error playing track: {}", e);
            PlaybackError::from(e)
        })?;

        info!("Playing track {}: {}", position, uri);
        self.state.current_index = Some(position);
        self.state.playing = true;
        Ok(())
    }

    /// Pauses playback. Does nothing unless something is playing.
    pub async fn pause<D>(&mut self, device: &D) -> Result<(), PlaybackError>
    where
        D: PlaybackDevice + ?Sized,
    {
        let Some(device_id) = self.device_id.as_deref() else {
            return Ok(());
        };
        if !self.state.playing {
            return Ok(());
        }

        device.pause(device_id).await.map_err(|e| {
            warning!("Error pausing playback: {}", e);
            PlaybackError::from(e)
        })?;

        self.state.playing = false;
        Ok(())
    }

    pub async fn toggle_play_pause<C>(&mut self, catalog: &C) -> Result<(), PlaybackError>
    where
        C: SearchCapability + PlaybackDevice,
    {
        let Some(device_id) = self.device_id.clone() else {
            return Err(PlaybackError::DeviceNotReady);
        };

        match self.state.current_index {
            None if self.tracks.is_empty() => Ok(()),
            None => self.play(0, catalog).await,
            Some(_) if self.state.playing => self.pause(catalog).await,
            Some(_) => {
                catalog.resume(&device_id).await.map_err(|e| {
                    warning!("Error resuming playback: {}", e);
                    PlaybackError::from(e)
                })?;
                self.state.playing = true;
                Ok(())
            }
        }
    }

    pub async fn next<C>(&mut self, catalog: &C) -> Result<(), PlaybackError>
    where
        C: SearchCapability + PlaybackDevice,
    {
        match self.next_index() {
            Some(index) => self.play(index as i64, catalog).await,
            None => Ok(()),
        }
    }

    pub async fn previous<C>(&mut self, catalog: &C) -> Result<(), PlaybackError>
    where
        C: SearchCapability + PlaybackDevice,
    {
        match self.previous_index() {
            Some(index) => self.play(index as i64, catalog).await,
            None => Ok(()),
        }
    }

    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(self.state.current_index.map_or(0, |i| (i + 1) % len))
    }

    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(self.state.current_index.map_or(0, |i| (i + len - 1) % len))
    }

    /// Adopts a state change reported by the player widget.
    ///
    /// The widget only reports name and artist, so the first local track with
    /// both equal wins. Two tracks sharing name and artist cannot be told
    /// apart; switch to id matching if the notification ever carries one.
    pub fn external_state_changed(
        &mut self,
        track_name: &str,
        artist_name: &str,
        paused: bool,
    ) -> Option<usize> {
        let position = self
            .tracks
            .iter()
            .position(|t| t.name == track_name && t.artist == artist_name);

        match position {
            Some(index) => {
                info!(
                    "Player now on track {} (\"{}\" by {}), paused: {}",
                    index, track_name, artist_name, paused
                );
                self.state.current_index = Some(index);
                self.state.playing = !paused;
            }
            None => info!(
                "Player state changed to \"{}\" by {}, which is not in the playlist",
                track_name, artist_name
            ),
        }

        position
    }

    fn checked_index(&self, index: i64) -> Result<usize, PlaybackError> {
        let len = self.tracks.len();
        match usize::try_from(index) {
            Ok(position) if position < len => Ok(position),
            _ => {
                warning!("Invalid track index: {}", index);
                Err(PlaybackError::InvalidIndex { index, len })
            }
        }
    }
}
