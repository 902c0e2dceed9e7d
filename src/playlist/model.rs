//! Playlist model types: `Track` and `Playlist`.

use serde::Deserialize;

use crate::error::PlayerError;

/// One playable entry. Immutable once the playlist is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    /// Path or URI handed to the engine.
    #[serde(alias = "file")]
    pub source: String,
    /// Artwork shown next to the track details.
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "trackName")]
    pub title: String,
    #[serde(default, alias = "trackArtist")]
    pub artist: String,
    #[serde(default, alias = "trackAlbum")]
    pub album: String,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }
}

/// A non-empty, index-addressed track list. Insertion order is play order and
/// navigation wraps at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Validate `index` against the playlist bounds.
    pub fn check_index(&self, index: usize) -> Result<(), PlayerError> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_index(&self, current: usize) -> usize {
        (current + 1) % self.tracks.len()
    }

    /// Index before `current`, wrapping to the last track.
    pub fn prev_index(&self, current: usize) -> usize {
        let len = self.tracks.len();
        (current % len + len - 1) % len
    }
}
