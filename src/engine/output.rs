//! `rodio`-backed engine used by the terminal host.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::EngineError;

use super::Engine;
use super::sink::{PreparedSink, create_sink_at};
use super::types::EngineEvent;

pub struct RodioEngine {
    stream: OutputStream,
    volume: f32,

    path: Option<PathBuf>,
    sink: Option<Sink>,
    /// Position the current sink was started from; `Sink::get_pos` counts from here.
    offset: Duration,
    duration: Option<Duration>,
    playing: bool,

    events: VecDeque<EngineEvent>,
}

impl RodioEngine {
    /// Open the default output device. `volume` is applied to every source.
    pub fn open(volume: f32) -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped; that would scribble
        // over the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            volume,
            path: None,
            sink: None,
            offset: Duration::ZERO,
            duration: None,
            playing: false,
            events: VecDeque::new(),
        })
    }

    fn replace_sink(&mut self, prepared: PreparedSink) -> Option<Duration> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if self.playing {
            prepared.sink.play();
        }
        self.sink = Some(prepared.sink);
        prepared.total
    }
}

/// Local path for a track source; a `file://` URI names a local file.
fn source_path(source: &str) -> PathBuf {
    PathBuf::from(source.strip_prefix("file://").unwrap_or(source))
}

/// Ask the tag reader for a length when the decoder cannot tell (common for mp3).
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

impl Engine for RodioEngine {
    fn load(&mut self, source: &str) -> Result<(), EngineError> {
        let path = source_path(source);
        self.playing = false;
        self.offset = Duration::ZERO;

        let prepared = match create_sink_at(&self.stream, &path, Duration::ZERO, self.volume) {
            Ok(p) => p,
            Err(e) => {
                warn!("engine: failed to load {source}: {e}");
                if let Some(old) = self.sink.take() {
                    old.stop();
                }
                self.path = None;
                self.duration = None;
                return Err(e);
            }
        };

        let total = self.replace_sink(prepared);
        self.duration = total.or_else(|| probe_duration(&path));
        debug!("engine: loaded {source} (duration {:?})", self.duration);
        self.path = Some(path);
        self.events.push_back(EngineEvent::MetadataLoaded);
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let sink = self.sink.as_ref().ok_or(EngineError::NotLoaded)?;
        sink.play();
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            s.pause();
        }
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        let Some(ref sink) = self.sink else {
            return 0.0;
        };
        let pos = self.offset + sink.get_pos();
        match self.duration {
            Some(total) => pos.min(total).as_secs_f64(),
            None => pos.as_secs_f64(),
        }
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<(), EngineError> {
        let path = self.path.clone().ok_or(EngineError::NotLoaded)?;
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let target = Duration::from_secs_f64(seconds);

        // Scrubbing rebuilds the sink and skips into the file.
        let prepared = create_sink_at(&self.stream, &path, target, self.volume)?;
        self.replace_sink(prepared);
        self.offset = target;
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    fn ended(&self) -> bool {
        self.playing && self.sink.as_ref().is_some_and(|s| s.empty())
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.events.pop_front()
    }
}
