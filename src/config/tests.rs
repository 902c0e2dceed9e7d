use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path(),
        Some(PathBuf::from("/tmp/cadenza-test-config.toml"))
    );
}

#[test]
fn default_config_path_uses_xdg_then_home() {
    let _lock = env_lock();
    let _home = EnvGuard::set("HOME", "/tmp/home-dir");

    {
        let _xdg = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
        assert_eq!(
            default_config_path(),
            Some(PathBuf::from("/tmp/xdg-config-home/cadenza/config.toml"))
        );
    }

    let _xdg = EnvGuard::remove("XDG_CONFIG_HOME");
    assert_eq!(
        default_config_path(),
        Some(PathBuf::from("/tmp/home-dir/.config/cadenza/config.toml"))
    );
}

#[test]
fn defaults_match_widget_defaults() {
    let s = Settings::default();
    assert_eq!(s.player.default_track, 0);
    assert!(!s.player.auto_play);
    assert!(!s.player.debug_logging);
    assert_eq!(s.player.tick_interval(), Duration::from_millis(50));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
default_track = 2
auto_play = true
debug_logging = true
tick_interval_ms = 100

[audio]
volume = 0.05

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
thumbnail_names = ["art.png"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__PLAYER__AUTO_PLAY");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.default_track, 2);
    assert!(s.player.auto_play);
    assert!(s.player.debug_logging);
    assert_eq!(s.player.tick_interval_ms, 100);
    assert!((s.audio.volume - 0.05).abs() < f32::EPSILON);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.thumbnail_names, vec!["art.png".to_string()]);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
auto_play = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__PLAYER__AUTO_PLAY", "true");

    let s = Settings::load().unwrap();
    assert!(s.player.auto_play);
}

#[test]
fn validate_rejects_zero_tick_interval_and_bad_volume() {
    let mut s = Settings::default();
    s.player.tick_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());
}
