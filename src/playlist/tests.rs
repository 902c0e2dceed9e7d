use super::*;
use crate::config::LibrarySettings;
use crate::error::{PlayerError, PlaylistError};
use std::fs;
use tempfile::tempdir;

fn t(title: &str) -> Track {
    Track {
        source: format!("/music/{title}.mp3"),
        thumbnail: None,
        title: title.into(),
        artist: String::new(),
        album: String::new(),
    }
}

#[test]
fn empty_playlist_is_rejected() {
    assert!(matches!(
        Playlist::new(Vec::new()),
        Err(PlayerError::EmptyPlaylist)
    ));
}

#[test]
fn next_and_prev_wrap_at_both_ends() {
    let playlist = Playlist::new(vec![t("A"), t("B"), t("C")]).unwrap();

    assert_eq!(playlist.next_index(0), 1);
    assert_eq!(playlist.next_index(2), 0);
    assert_eq!(playlist.prev_index(0), 2);
    assert_eq!(playlist.prev_index(1), 0);
}

#[test]
fn single_track_playlist_wraps_onto_itself() {
    let playlist = Playlist::new(vec![t("Solo")]).unwrap();
    assert_eq!(playlist.next_index(0), 0);
    assert_eq!(playlist.prev_index(0), 0);
}

#[test]
fn check_index_reports_length() {
    let playlist = Playlist::new(vec![t("A"), t("B")]).unwrap();
    assert!(playlist.check_index(1).is_ok());
    assert!(matches!(
        playlist.check_index(2),
        Err(PlayerError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn display_prefers_artist_dash_title() {
    let mut track = t("Song");
    assert_eq!(track.display(), "Song");
    track.artist = "  ".into();
    assert_eq!(track.display(), "Song");
    track.artist = "Artist".into();
    assert_eq!(track.display(), "Artist - Song");
}

#[test]
fn load_playlist_file_resolves_relative_paths() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    fs::write(
        &path,
        r#"
[[tracks]]
file = "mp3/01.mp3"
thumb = "thumbs/01.jpg"
trackName = "Lesson 1"
trackArtist = "Teacher"
trackAlbum = "Single"

[[tracks]]
source = "/abs/02.mp3"
title = ""
"#,
    )
    .unwrap();

    let playlist = load_playlist_file(&path).unwrap();
    assert_eq!(playlist.len(), 2);

    let first = &playlist.tracks()[0];
    assert_eq!(
        first.source,
        dir.path().join("mp3/01.mp3").display().to_string()
    );
    assert_eq!(
        first.thumbnail.as_deref(),
        Some(dir.path().join("thumbs/01.jpg").display().to_string().as_str())
    );
    assert_eq!(first.title, "Lesson 1");
    assert_eq!(first.artist, "Teacher");
    assert_eq!(first.album, "Single");

    let second = &playlist.tracks()[1];
    assert_eq!(second.source, "/abs/02.mp3");
    assert_eq!(second.thumbnail, None);
    assert_eq!(second.title, "02");
}

#[test]
fn load_playlist_file_keeps_uris() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    fs::write(
        &path,
        r#"
[[tracks]]
file = "https://example.com/a.mp3"
title = "Remote"
"#,
    )
    .unwrap();

    let playlist = load_playlist_file(&path).unwrap();
    assert_eq!(playlist.tracks()[0].source, "https://example.com/a.mp3");
}

#[test]
fn load_playlist_file_without_tracks_is_empty_playlist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    fs::write(&path, "").unwrap();

    assert!(matches!(
        load_playlist_file(&path),
        Err(PlaylistError::Player(PlayerError::EmptyPlaylist))
    ));
}

#[test]
fn load_playlist_file_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    fs::write(&path, "[[tracks]]\ntitle = 3\n").unwrap();

    assert!(matches!(
        load_playlist_file(&path),
        Err(PlaylistError::Parse { .. })
    ));
}

#[test]
fn load_playlist_file_reports_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_playlist_file(&dir.path().join("missing.toml")),
        Err(PlaylistError::Io { .. })
    ));
}

#[test]
fn scan_filters_non_audio_and_sorts_case_insensitive() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[1].title, "b");
}

#[test]
fn scan_skips_hidden_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "root");
}

#[test]
fn scan_attaches_directory_thumbnail() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("album");
    fs::create_dir_all(&album).unwrap();
    fs::write(album.join("one.mp3"), b"not real").unwrap();
    fs::write(album.join("Cover.JPG"), b"not an image").unwrap();
    fs::write(dir.path().join("loose.mp3"), b"not real").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    let one = tracks.iter().find(|t| t.title == "one").unwrap();
    let loose = tracks.iter().find(|t| t.title == "loose").unwrap();

    assert_eq!(
        one.thumbnail.as_deref(),
        Some(album.join("Cover.JPG").display().to_string().as_str())
    );
    assert_eq!(loose.thumbnail, None);
}

#[test]
fn scan_playlist_of_empty_dir_fails() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        scan_playlist(dir.path(), &LibrarySettings::default()),
        Err(PlaylistError::Player(PlayerError::EmptyPlaylist))
    ));
}
