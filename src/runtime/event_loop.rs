use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::config;
use crate::controller::{Command, PlaybackController};
use crate::engine::Engine;
use crate::error::{AppError, PlayerError};
use crate::ui::{self, Hit};
use crate::view::WidgetView;

/// Upper bound on how long the loop sleeps waiting for input while idle.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Host-side state that is not part of the playback session.
pub struct EventLoopState {
    /// Keyboard cursor in the playlist; may differ from the current track.
    pub cursor: usize,
    /// Last error shown in the now-playing panel.
    pub status: Option<String>,
    /// Frame area from the last draw, used for mouse hit-testing.
    area: Rect,
    last_track: usize,
}

impl EventLoopState {
    pub fn new(current_track: usize) -> Self {
        Self {
            cursor: current_track,
            status: None,
            area: Rect::default(),
            last_track: current_track,
        }
    }

    /// Move the cursor along with the current track whenever it changes.
    fn follow(&mut self, current_track: usize) {
        if current_track != self.last_track {
            self.cursor = current_track;
            self.last_track = current_track;
        }
    }

    fn report(&mut self, result: Result<(), PlayerError>) {
        match result {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!("player: {e}");
                self.status = Some(e.to_string());
            }
        }
    }
}

/// How long to wait for input before the next reconciliation is due.
pub fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(due) => due.saturating_duration_since(now).min(IDLE_POLL),
        None => IDLE_POLL,
    }
}

/// Main terminal loop. Returns `Ok(())` when the user quits.
pub fn run<E: Engine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaybackController<E, WidgetView>,
    state: &mut EventLoopState,
) -> Result<(), AppError> {
    loop {
        controller.pump_engine_events();
        if let Err(e) = controller.tick(Instant::now()) {
            state.report(Err(e));
        }
        state.follow(controller.current_track());

        terminal.draw(|f| {
            state.area = f.area();
            ui::draw(
                f,
                controller.projector(),
                state.cursor,
                state.status.as_deref(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        let timeout = poll_timeout(controller.next_deadline(), Instant::now());
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(key, settings, controller, state) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, controller, state),
            _ => {}
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<E: Engine>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaybackController<E, WidgetView>,
    state: &mut EventLoopState,
) -> bool {
    let scrub = settings.controls.scrub_seconds as f64;

    let result = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('h') | KeyCode::Left => controller.dispatch(Command::Prev),
        KeyCode::Char('l') | KeyCode::Right => controller.dispatch(Command::Next),
        KeyCode::Char(' ') | KeyCode::Char('p') => controller.dispatch(Command::TogglePlay),
        KeyCode::Char('s') => controller.dispatch(Command::Stop),
        KeyCode::Char('H') => controller.seek_by(-scrub),
        KeyCode::Char('L') => controller.seek_by(scrub),
        KeyCode::Char('j') | KeyCode::Down => {
            state.cursor = controller.playlist().next_index(state.cursor);
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.cursor = controller.playlist().prev_index(state.cursor);
            return false;
        }
        KeyCode::Char('g') | KeyCode::Home => {
            state.cursor = 0;
            return false;
        }
        KeyCode::Char('G') | KeyCode::End => {
            state.cursor = controller.playlist().len() - 1;
            return false;
        }
        KeyCode::Enter => select_row(controller, state.cursor),
        _ => return false,
    };

    state.report(result);
    false
}

fn handle_mouse_event<E: Engine>(
    mouse: MouseEvent,
    controller: &mut PlaybackController<E, WidgetView>,
    state: &mut EventLoopState,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let hit = ui::hit_test(
        state.area,
        controller.projector(),
        state.cursor,
        mouse.column,
        mouse.row,
    );
    let result = match hit {
        Some(Hit::Button(command)) => controller.dispatch(command),
        Some(Hit::Seek {
            offset_x,
            bar_width,
        }) => controller.seek_to(offset_x, bar_width),
        Some(Hit::Row(index)) => {
            state.cursor = index;
            select_row(controller, index)
        }
        None => return,
    };
    state.report(result);
}

/// Clicking or entering on the row that is already current does nothing.
fn select_row<E: Engine>(
    controller: &mut PlaybackController<E, WidgetView>,
    index: usize,
) -> Result<(), PlayerError> {
    if index == controller.current_track() {
        return Ok(());
    }
    controller.select_track(index)
}
