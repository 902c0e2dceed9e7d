//! Utilities for creating `rodio` sinks from track sources.
//!
//! Opening and decoding a file and preparing a paused `Sink` at the requested
//! start position lives here so load and seek share one path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::EngineError;

/// A freshly built, paused sink plus the decoder-reported source length.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub total: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<PreparedSink, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let total = decoder.total_duration();

    // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();

    Ok(PreparedSink { sink, total })
}
