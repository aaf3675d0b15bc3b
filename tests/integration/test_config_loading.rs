//! Integration tests for configuration files on disk

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use cncclient::config::{ClientConfig, ConfigLoader, LoadOptions};
use cncclient::error::Error;
use cncclient::platform::OsVersion;
use test_utils::write_file;

#[test]
fn test_load_toml_from_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "client.toml",
        r#"
[game]
directory = "/games/tiberian-sun"
executable_name = "Game.exe"
launcher_executable_name = "launcher.exe"
os = "windows"

[display]
windowed_mode = true
use_display_shim = true

[launch]
extra_command_line = "-CD. -NOLOGO"
single_core_affinity = true

[preprocessing]
poll_interval_ms = 500
max_polls = 20
"#,
    );

    let mut loader = ConfigLoader::new();
    let config = loader.load_from_path(&path).unwrap();
    assert_eq!(loader.current_path(), Some(path.as_path()));
    assert_eq!(config.os(), OsVersion::Windows);

    let launch = config.launch_configuration();
    assert_eq!(launch.game_directory, PathBuf::from("/games/tiberian-sun"));
    assert_eq!(launch.executables.executable_name, "Game.exe");
    assert_eq!(
        launch.executables.launcher_executable_name.as_deref(),
        Some("launcher.exe")
    );
    assert!(launch.launches_via_shim());
    assert!(launch.pin_single_core);
    assert_eq!(launch.extra_command_line, "-CD. -NOLOGO");
    assert_eq!(launch.preprocess_poll_interval, Duration::from_millis(500));
    assert_eq!(launch.preprocess_max_polls, 20);
}

#[test]
fn test_load_json_from_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "client.json",
        r#"{"game": {"unix_executable_name": "ts.sh"}, "preprocessing": {"enabled": false}}"#,
    );

    let config = ConfigLoader::new().load_from_path(&path).unwrap();
    assert_eq!(config.game.executables.unix_executable_name, "ts.sh");
    assert!(!config.preprocessing.enabled);
    assert_eq!(config.display, ClientConfig::default().display);
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "client.toml", "[preprocessing]\nmax_polls = 0\n");

    let result = ConfigLoader::new().load_from_path(&path);
    assert!(matches!(
        result,
        Err(Error::ConfigValidationFailed { field, .. }) if field == "preprocessing.max_polls"
    ));
}

#[test]
fn test_malformed_file_reports_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "client.json", "{ not json");

    let result = ConfigLoader::new().load_from_path(&path);
    assert!(matches!(
        result,
        Err(Error::ConfigParseFailed { format, .. }) if format == "JSON"
    ));
}

#[test]
fn test_json_round_trip_through_search_path() {
    let dir = TempDir::new().unwrap();
    let mut loader = ConfigLoader::new();
    loader.set_search_path(dir.path().to_path_buf());

    let mut config = ClientConfig::default();
    config.game.os = Some(OsVersion::Unix);
    config.launch.stale_log_files = vec!["RA2.LOG".to_string()];
    loader
        .save_to_path(&config, &dir.path().join("config.json"))
        .unwrap();

    let loaded = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_save_uses_loaded_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", "[launch]\nsingle_core_affinity = true\n");

    let mut loader = ConfigLoader::new();
    loader.set_search_path(dir.path().to_path_buf());
    let mut config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert!(config.launch.single_core_affinity);

    config.launch.extra_command_line = "-SPEEDCONTROL".to_string();
    let saved_to = loader.save(&config).unwrap();
    assert_eq!(saved_to, path);

    let reloaded = ConfigLoader::new().load_from_path(&path).unwrap();
    assert_eq!(reloaded.launch.extra_command_line, "-SPEEDCONTROL");
}
