use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lofty::file::TaggedFileExt;
use lofty::tag::Accessor;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlaylistError;

use super::model::{Playlist, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// First artwork file in `dir` matching one of the configured names (case-insensitive).
fn find_thumbnail(dir: &Path, settings: &LibrarySettings) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut names: HashMap<String, PathBuf> = HashMap::new();
    for entry in entries.filter_map(Result::ok) {
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_ascii_lowercase(), entry.path());
        }
    }

    settings
        .thumbnail_names
        .iter()
        .find_map(|n| names.get(&n.to_ascii_lowercase()))
        .map(|p| p.display().to_string())
}

fn read_track(path: &Path, thumbnail: Option<String>) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = String::new();
    let mut album = String::new();

    if let Ok(tagged) = lofty::read_from_path(path) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.trim().to_string();
                }
            }
            if let Some(v) = tag.artist() {
                artist = v.trim().to_string();
            }
            if let Some(v) = tag.album() {
                album = v.trim().to_string();
            }
        }
    }

    Track {
        source: path.display().to_string(),
        thumbnail,
        title,
        artist,
        album,
    }
}

/// Walk `dir` and collect audio files as tracks, sorted case-insensitively by
/// their `Artist - Title` display. Paths reached twice (symlinks) appear once.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut thumbs: HashMap<PathBuf, Option<String>> = HashMap::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(key) {
            continue;
        }

        let parent = path.parent().unwrap_or(dir).to_path_buf();
        let thumbnail = thumbs
            .entry(parent)
            .or_insert_with_key(|p| find_thumbnail(p, settings))
            .clone();

        tracks.push(read_track(path, thumbnail));
    }

    tracks.sort_by_key(|t| t.display().to_lowercase());
    tracks
}

/// Scan `dir` into a playlist; an empty directory is an `EmptyPlaylist` error.
pub fn scan_playlist(dir: &Path, settings: &LibrarySettings) -> Result<Playlist, PlaylistError> {
    Ok(Playlist::new(scan(dir, settings))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.jpg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn is_hidden_detects_dotfiles() {
        assert!(is_hidden(Path::new("/music/.cache")));
        assert!(!is_hidden(Path::new("/music/album")));
    }
}
