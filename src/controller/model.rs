//! Controller model types: `PlaybackState`, `Command`, `PlayerConfig` and the
//! `PlayerSession` the controller owns.

use std::time::Duration;

use crate::config::Settings;
use crate::playlist::{Playlist, Track};

/// Playback lifecycle state. Exactly one value at any time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Control-surface gestures, dispatched through `PlaybackController::dispatch`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    Play,
    Pause,
    Stop,
    /// The play button doubles as the pause button while playing.
    TogglePlay,
}

/// Construction-time options for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Track preloaded by `initialize`.
    pub default_track: usize,
    /// Selecting a track starts playback immediately.
    pub auto_play: bool,
    pub debug_logging: bool,
    /// Reconciliation interval while playing.
    pub tick_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_track: 0,
            auto_play: false,
            debug_logging: false,
            tick_interval: Duration::from_millis(50),
        }
    }
}

impl From<&Settings> for PlayerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            default_track: settings.player.default_track,
            auto_play: settings.player.auto_play,
            debug_logging: settings.player.debug_logging,
            tick_interval: settings.player.tick_interval(),
        }
    }
}

/// Per-widget playback state. The engine clock is not stored here; it is read
/// from the engine whenever a reconciliation needs it.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    playlist: Playlist,
    current_track: usize,
    state: PlaybackState,
}

impl PlayerSession {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            current_track: 0,
            state: PlaybackState::Stopped,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> usize {
        self.current_track
    }

    pub fn track(&self) -> &Track {
        &self.playlist.tracks()[self.current_track]
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub(super) fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
    }

    /// Callers validate `index` against the playlist first.
    pub(super) fn set_current_track(&mut self, index: usize) {
        debug_assert!(index < self.playlist.len());
        self.current_track = index;
    }
}
