//! Error types shared across the player.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an audio engine implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output error: {0}")]
    Output(String),

    #[error("no source loaded")]
    NotLoaded,
}

/// Failures of the playback controller.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("track index {index} out of range (playlist has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Failures while reading a playlist from disk.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse playlist {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Top-level error returned by the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("logger initialization error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        AppError::Player(PlayerError::Engine(error))
    }
}
