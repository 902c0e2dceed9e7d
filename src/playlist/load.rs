use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::PlaylistError;

use super::model::{Playlist, Track};

/// On-disk playlist format.
///
/// ```toml
/// [[tracks]]
/// file = "mp3/01.mp3"
/// thumb = "thumbs/01.jpg"
/// title = "Lesson 1"
/// artist = "Someone"
/// album = "Single"
/// ```
#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default, alias = "playlist")]
    tracks: Vec<Track>,
}

/// Load a TOML playlist. Relative sources and thumbnails resolve against the
/// playlist file's directory.
pub fn load_playlist_file(path: &Path) -> Result<Playlist, PlaylistError> {
    info!("Loading playlist {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PlaylistFile = toml::from_str(&content).map_err(|source| PlaylistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let tracks = file
        .tracks
        .into_iter()
        .map(|t| normalize(t, base))
        .collect();

    Ok(Playlist::new(tracks)?)
}

fn normalize(mut track: Track, base: &Path) -> Track {
    track.source = resolve(&track.source, base);
    track.thumbnail = track
        .thumbnail
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|t| resolve(&t, base));

    if track.title.trim().is_empty() {
        track.title = Path::new(&track.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
    }
    track
}

fn resolve(reference: &str, base: &Path) -> String {
    // Leave URIs (`http://…`, `file://…`) alone.
    if reference.contains("://") {
        return reference.to_string();
    }
    let p = Path::new(reference);
    if p.is_absolute() {
        reference.to_string()
    } else {
        base.join(p).display().to_string()
    }
}
