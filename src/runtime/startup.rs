use std::env;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::LibrarySettings;
use crate::error::PlaylistError;
use crate::playlist::{Playlist, load_playlist_file, scan_playlist};

/// The playlist argument: first CLI argument, else the current directory.
pub fn playlist_source() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A directory is scanned for audio files; anything else is read as a playlist file.
pub fn load_playlist(source: &Path, library: &LibrarySettings) -> Result<Playlist, PlaylistError> {
    let playlist = if source.is_dir() {
        info!("scanning {} for tracks", source.display());
        scan_playlist(source, library)?
    } else {
        load_playlist_file(source)?
    };
    info!("playlist ready: {} tracks", playlist.len());
    Ok(playlist)
}
