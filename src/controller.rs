//! Playback controller: the state machine tying the playlist, the engine and
//! the projector together.

mod model;
mod player;
mod ticker;

pub use model::*;
pub use player::PlaybackController;
