//! Configuration loading and state persistence across invocations

use std::fs;
use std::path::Path;
use sunohub_cli::{App, CliConfig, CliError};
use sunohub_playback::RepeatMode;
use tempfile::TempDir;

fn write_config(dir: &Path, state_path: &Path) -> std::path::PathBuf {
    let path = dir.join("sunohub.toml");
    fs::write(
        &path,
        format!(
            r#"
[backend]
url = "https://project.supabase.co"
anon_key = "anon-key"
user_id = "user-1"

[app]
base_url = "https://hub.example.com"

[storage]
state_path = "{}"
"#,
            state_path.display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    let path = write_config(dir.path(), &state);

    let config = CliConfig::load(Some(&path)).unwrap();

    assert_eq!(config.backend.url, "https://project.supabase.co");
    assert_eq!(config.backend.anon_key, "anon-key");
    assert_eq!(config.backend.user_id.as_deref(), Some("user-1"));
    assert!(config.backend.access_token.is_none());
    assert_eq!(config.app.base_url, "https://hub.example.com");
    assert_eq!(config.storage.state_path, state);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(
        &path,
        "[backend]\nurl = \"https://project.supabase.co\"\nanon_key = \"k\"\n",
    )
    .unwrap();

    let config = CliConfig::load(Some(&path)).unwrap();

    assert_eq!(config.app.base_url, "https://sunohub.app");
    assert_eq!(
        config.storage.state_path,
        Path::new("./data/player_state.json")
    );
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = CliConfig::load(Some(&missing)).unwrap_err();

    assert!(matches!(err, CliError::Config(msg) if msg.contains("not found")));
}

#[test]
fn test_player_modes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("nested").join("state.json");
    let config = CliConfig::load(Some(&write_config(dir.path(), &state))).unwrap();

    {
        let mut app = App::open(config.clone()).unwrap();
        app.toggle_shuffle().unwrap();
        app.toggle_repeat().unwrap();
        app.toggle_repeat().unwrap();
    }

    assert!(state.exists());

    let app = App::open(config).unwrap();
    assert!(app.controller().is_shuffle());
    assert_eq!(app.controller().repeat_mode(), RepeatMode::One);
    assert!(app.controller().queue().is_empty());
}

#[test]
fn test_corrupt_state_file_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, "{ not json").unwrap();
    let config = CliConfig::load(Some(&write_config(dir.path(), &state))).unwrap();

    let Err(err) = App::open(config) else {
        panic!("corrupt state file should not open");
    };

    assert!(matches!(err, CliError::Storage(_)));
}
