//! Projection seam between the controller and whatever draws the widget.
//!
//! The controller pushes derived values through [`UiProjector`]; the terminal
//! host collects them in a [`WidgetView`] that `ui::draw` renders each frame.

mod model;

pub use model::*;

use crate::controller::PlaybackState;
use crate::playlist::{Playlist, Track};

pub trait UiProjector {
    fn render_playlist(&mut self, playlist: &Playlist);
    fn highlight_track(&mut self, index: usize);
    fn render_track_details(&mut self, track: &Track);
    fn update_thumbnail(&mut self, thumbnail: Option<&str>);
    fn set_progress_fill(&mut self, percent: f64);
    fn set_elapsed_text(&mut self, text: &str);
    fn set_total_text(&mut self, text: &str);
    /// Flip the play/pause button.
    fn set_play_state(&mut self, state: PlaybackState);
}
