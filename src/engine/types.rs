//! Small value types exchanged with the engine.

/// A reading of the engine's media clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EngineClock {
    /// Seconds since the start of the source.
    pub current_time: f64,
    /// Source length in seconds; `None` while metadata is still loading.
    pub duration: Option<f64>,
}

impl Default for EngineClock {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
        }
    }
}

/// Asynchronous notifications raised by an engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The source's metadata (duration) is now available.
    MetadataLoaded,
}
