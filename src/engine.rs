//! The audio engine seam.
//!
//! The controller never decodes audio itself; it drives an [`Engine`] and reads
//! its clock back. `RodioEngine` is the implementation used by the terminal
//! host.

mod output;
mod sink;
mod types;

pub use output::RodioEngine;
pub use types::*;

use crate::error::EngineError;

/// An opaque, single-source playback primitive with a time-addressable clock.
pub trait Engine {
    /// Replace the current source. The engine is left loaded but not playing.
    fn load(&mut self, source: &str) -> Result<(), EngineError>;

    /// Start or resume playback from the current position.
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position, keeping the playing/paused state.
    fn set_current_time(&mut self, seconds: f64) -> Result<(), EngineError>;

    /// Track length in seconds, `None` until metadata is known.
    fn duration(&self) -> Option<f64>;

    /// Whether playback ran off the end of the current source.
    fn ended(&self) -> bool;

    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<EngineEvent>;

    /// Snapshot of the clock for reconciliation.
    fn clock(&self) -> EngineClock {
        EngineClock {
            current_time: self.current_time(),
            duration: self.duration(),
        }
    }
}
