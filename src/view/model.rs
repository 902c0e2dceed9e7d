use crate::controller::PlaybackState;
use crate::playlist::{Playlist, Track};

use super::UiProjector;

/// One row of the rendered playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub title: String,
    pub artist: String,
}

/// The detail panel under the thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDetails {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Everything the terminal widget shows, as last projected by the controller.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub rows: Vec<PlaylistRow>,
    pub highlighted: Option<usize>,
    pub details: Option<TrackDetails>,
    pub thumbnail: Option<String>,
    pub progress_fill: f64,
    pub elapsed: String,
    pub total: String,
    pub play_state: PlaybackState,
}

impl Default for WidgetView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            highlighted: None,
            details: None,
            thumbnail: None,
            progress_fill: 0.0,
            elapsed: "00:00".to_string(),
            total: "00:00".to_string(),
            play_state: PlaybackState::Stopped,
        }
    }
}

impl WidgetView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gauge ratio in `0.0..=1.0`.
    pub fn progress_ratio(&self) -> f64 {
        (self.progress_fill / 100.0).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlaybackState::Playing
    }
}

impl UiProjector for WidgetView {
    fn render_playlist(&mut self, playlist: &Playlist) {
        self.rows = playlist
            .tracks()
            .iter()
            .map(|t| PlaylistRow {
                title: t.title.clone(),
                artist: t.artist.clone(),
            })
            .collect();
    }

    fn highlight_track(&mut self, index: usize) {
        self.highlighted = (index < self.rows.len()).then_some(index);
    }

    fn render_track_details(&mut self, track: &Track) {
        self.details = Some(TrackDetails {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
        });
    }

    fn update_thumbnail(&mut self, thumbnail: Option<&str>) {
        self.thumbnail = thumbnail.map(str::to_string);
    }

    fn set_progress_fill(&mut self, percent: f64) {
        self.progress_fill = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    fn set_elapsed_text(&mut self, text: &str) {
        text.clone_into(&mut self.elapsed);
    }

    fn set_total_text(&mut self, text: &str) {
        text.clone_into(&mut self.total);
    }

    fn set_play_state(&mut self, state: PlaybackState) {
        self.play_state = state;
    }
}
