//! The playback state machine.
//!
//! `PlaybackController` owns the session, the engine handle, the projector and
//! the reconciliation ticker. Every transition drives the engine first and then
//! pushes the projections that reflect it, so a caller never observes a stale
//! derived value once a command returns.

use std::time::Instant;

use log::debug;

use crate::engine::{Engine, EngineClock, EngineEvent};
use crate::error::PlayerError;
use crate::playlist::Playlist;
use crate::progress::{Reconciliation, seek_fraction};
use crate::view::UiProjector;

use super::model::{Command, PlaybackState, PlayerConfig, PlayerSession};
use super::ticker::Ticker;

pub struct PlaybackController<E, P> {
    session: PlayerSession,
    engine: E,
    projector: P,
    ticker: Ticker,
    config: PlayerConfig,
}

impl<E: Engine, P: UiProjector> PlaybackController<E, P> {
    /// Build a controller. Nothing is loaded until [`initialize`](Self::initialize).
    pub fn new(
        playlist: Playlist,
        config: PlayerConfig,
        engine: E,
        projector: P,
    ) -> Result<Self, PlayerError> {
        // `Playlist` cannot be empty, but a misconfigured default index can.
        playlist.check_index(config.default_track)?;

        Ok(Self {
            session: PlayerSession::new(playlist),
            engine,
            projector,
            ticker: Ticker::new(config.tick_interval),
            config,
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn current_track(&self) -> usize {
        self.session.current_track()
    }

    pub fn playlist(&self) -> &Playlist {
        self.session.playlist()
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Whether the reconciliation timer is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// When the next reconciliation is due, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    /// Render the playlist and preload the default track without playing it,
    /// so its duration is known before the first gesture.
    pub fn initialize(&mut self) -> Result<(), PlayerError> {
        if self.config.debug_logging {
            debug!("player: initializing with {:?}", self.config);
        }
        self.projector.render_playlist(self.session.playlist());
        self.change_track(self.config.default_track, false)?;
        self.stop()
    }

    /// Route a control-surface gesture.
    pub fn dispatch(&mut self, command: Command) -> Result<(), PlayerError> {
        debug!("player: dispatch {command:?}");
        match command {
            Command::Prev => self.prev(),
            Command::Next => self.next(),
            Command::Play => self.play(),
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::Stop => self.stop(),
            Command::TogglePlay => {
                if self.state() == PlaybackState::Playing {
                    self.pause();
                    Ok(())
                } else {
                    self.play()
                }
            }
        }
    }

    pub fn play(&mut self) -> Result<(), PlayerError> {
        if self.state() == PlaybackState::Playing {
            return Ok(());
        }

        self.engine.play()?;
        self.ticker.start(Instant::now());
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Only a playing engine is told to pause; the state becomes `Paused` either way.
    pub fn pause(&mut self) {
        if self.state() == PlaybackState::Playing {
            self.engine.pause();
        }
        self.ticker.cancel();
        self.set_state(PlaybackState::Paused);
    }

    /// Pause, rewind to zero and show the rewound clock.
    ///
    /// A failed rewind is returned only after the player has stopped, so the
    /// timer never outlives the `Playing` state.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        self.engine.pause();
        let rewound = self.engine.set_current_time(0.0);
        self.ticker.cancel();
        self.set_state(PlaybackState::Stopped);
        let rewound_clock = EngineClock {
            current_time: 0.0,
            duration: self.engine.duration(),
        };
        self.project(rewound_clock);
        rewound.map_err(PlayerError::from)
    }

    pub fn select_track(&mut self, index: usize) -> Result<(), PlayerError> {
        self.change_track(index, self.config.auto_play)
    }

    pub fn next(&mut self) -> Result<(), PlayerError> {
        let index = self.playlist().next_index(self.current_track());
        self.select_track(index)
    }

    pub fn prev(&mut self) -> Result<(), PlayerError> {
        let index = self.playlist().prev_index(self.current_track());
        self.select_track(index)
    }

    /// Jump to the position under a click at `offset_x` on a bar `bar_width` wide.
    pub fn seek_to(&mut self, offset_x: f64, bar_width: f64) -> Result<(), PlayerError> {
        let fraction = seek_fraction(offset_x, bar_width);
        if let Some(duration) = self.engine.duration().filter(|d| d.is_finite()) {
            self.engine.set_current_time(fraction * duration)?;
        }
        self.reconcile();
        Ok(())
    }

    /// Move the position by `delta` seconds, clamped to the track.
    pub fn seek_by(&mut self, delta: f64) -> Result<(), PlayerError> {
        let mut target = (self.engine.current_time() + delta).max(0.0);
        if let Some(duration) = self.engine.duration().filter(|d| d.is_finite()) {
            target = target.min(duration);
        }
        self.engine.set_current_time(target)?;
        self.reconcile();
        Ok(())
    }

    pub fn on_metadata_loaded(&mut self) {
        self.reconcile();
    }

    /// Drain pending engine notifications.
    pub fn pump_engine_events(&mut self) {
        while let Some(event) = self.engine.poll_event() {
            match event {
                EngineEvent::MetadataLoaded => self.on_metadata_loaded(),
            }
        }
    }

    /// Run the reconciliation timer body if it is due. Returns whether it ran.
    ///
    /// A source that played to its end advances the playlist.
    pub fn tick(&mut self, now: Instant) -> Result<bool, PlayerError> {
        if !self.ticker.fire(now) {
            return Ok(false);
        }

        self.reconcile();
        if self.engine.ended() {
            debug!("player: track {} ended", self.current_track());
            self.next()?;
        }
        Ok(true)
    }

    /// Recompute bar fill and time labels from the engine clock.
    pub fn reconcile(&mut self) {
        self.project(self.engine.clock());
    }

    fn project(&mut self, clock: EngineClock) {
        let r = Reconciliation::from_clock(clock);
        self.projector.set_progress_fill(r.fill_percent);
        self.projector.set_elapsed_text(&r.elapsed_text);
        self.projector.set_total_text(&r.total_text);
    }

    fn change_track(&mut self, index: usize, auto_play: bool) -> Result<(), PlayerError> {
        self.playlist().check_index(index)?;

        let was_playing = self.state() == PlaybackState::Playing;
        let source = self.playlist().tracks()[index].source.clone();

        if let Err(e) = self.engine.load(&source) {
            // The old source is gone; don't leave a timer polling nothing.
            if was_playing {
                self.ticker.cancel();
                self.set_state(PlaybackState::Paused);
            }
            return Err(e.into());
        }
        self.session.set_current_track(index);
        debug!("player: selected track {index} ({source})");

        // A fresh source starts paused; when already playing keep the running
        // timer and just resume the engine.
        let resumed = if was_playing {
            self.engine.play().map_err(PlayerError::from)
        } else if auto_play {
            self.play()
        } else {
            Ok(())
        };
        if resumed.is_err() && was_playing {
            self.ticker.cancel();
            self.set_state(PlaybackState::Paused);
        }

        let track = self.session.track();
        self.projector.highlight_track(index);
        self.projector.update_thumbnail(track.thumbnail.as_deref());
        self.projector.render_track_details(track);
        self.reconcile();
        resumed
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.session.state() != state {
            debug!("player: {:?} -> {:?}", self.session.state(), state);
        }
        self.session.set_state(state);
        self.projector.set_play_state(state);
    }
}
