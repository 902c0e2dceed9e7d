use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::controller::{PlaybackController, PlayerConfig};
use crate::engine::RodioEngine;
use crate::error::AppError;
use crate::view::WidgetView;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), AppError> {
    let (settings, settings_warning) = settings::load_settings();
    let _logger = logging::init(&settings)?;
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }

    let source = startup::playlist_source();
    let playlist = startup::load_playlist(&source, &settings.library)?;

    let engine = RodioEngine::open(settings.audio.volume)?;
    let mut controller = PlaybackController::new(
        playlist,
        PlayerConfig::from(&settings),
        engine,
        WidgetView::new(),
    )?;
    let mut state = event_loop::EventLoopState::new(settings.player.default_track);
    // A default track that fails to load is shown, not fatal.
    if let Err(e) = controller.initialize() {
        warn!("player: initial load failed: {e}");
        state.status = Some(e.to_string());
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
