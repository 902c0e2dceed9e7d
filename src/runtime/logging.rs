use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use log::debug;

use crate::config::{self, Settings};
use crate::error::AppError;

/// Log directory: `<config dir>/logs`, or a temp dir when `HOME` is unset.
pub fn log_dir() -> PathBuf {
    config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("cadenza-logs"))
}

/// Start file logging. The returned handle must outlive the player.
///
/// The TUI owns the terminal, so nothing is duplicated to stderr.
pub fn init(settings: &Settings) -> Result<LoggerHandle, AppError> {
    let level = if settings.player.debug_logging {
        "debug"
    } else {
        "info"
    };

    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(log_dir()).basename("cadenza"))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        .duplicate_to_stderr(Duplicate::None)
        .start()?;

    if settings.player.debug_logging {
        match toml::to_string(settings) {
            Ok(dump) => debug!("effective settings:\n{dump}"),
            Err(e) => debug!("effective settings: {settings:?} ({e})"),
        }
    }

    Ok(handle)
}
