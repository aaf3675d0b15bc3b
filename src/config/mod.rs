//! Configuration management for the client
//!
//! User settings are kept in a single TOML (or JSON) file with one table per
//! concern. Every field has a default, so partial files are valid. A launch
//! takes a snapshot of these settings as a `LaunchConfiguration`.

pub mod loader;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::launch::configuration::{
    GameExecutables, LaunchConfiguration, DEFAULT_PREPROCESS_MAX_POLLS, DEFAULT_SHIM_EXECUTABLE,
    DEFAULT_STALE_LOG_FILES,
};
use crate::platform::OsVersion;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub game: GameConfig,
    pub display: DisplayConfig,
    pub launch: LaunchSettings,
    pub preprocessing: PreprocessingConfig,
}

/// Game installation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game installation directory
    pub directory: PathBuf,

    #[serde(flatten)]
    pub executables: GameExecutables,

    /// Override the detected operating system family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsVersion>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            executables: GameExecutables::default(),
            os: None,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub windowed_mode: bool,

    /// Start the game through the display shim in windowed mode
    pub use_display_shim: bool,

    pub shim_executable: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            windowed_mode: false,
            use_display_shim: false,
            shim_executable: DEFAULT_SHIM_EXECUTABLE.to_string(),
        }
    }
}

/// Launch behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Extra arguments appended after `-SPAWN`
    pub extra_command_line: String,

    /// Pin the game to a single processor core
    pub single_core_affinity: bool,

    /// Log files removed from the game directory before launch
    pub stale_log_files: Vec<String>,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            extra_command_line: String::new(),
            single_core_affinity: false,
            stale_log_files: DEFAULT_STALE_LOG_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Preprocessing wait settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Regenerate INI files before launch
    pub enabled: bool,

    /// Wait between polls in milliseconds
    pub poll_interval_ms: u64,

    pub max_polls: u32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 1000,
            max_polls: DEFAULT_PREPROCESS_MAX_POLLS,
        }
    }
}

impl PreprocessingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ClientConfig {
    /// Operating system family to launch for
    pub fn os(&self) -> OsVersion {
        self.game.os.unwrap_or_else(OsVersion::detect)
    }

    /// Snapshot the settings a launch needs
    pub fn launch_configuration(&self) -> LaunchConfiguration {
        LaunchConfiguration {
            game_directory: self.game.directory.clone(),
            executables: self.game.executables.clone(),
            extra_command_line: self.launch.extra_command_line.clone(),
            use_display_shim: self.display.use_display_shim,
            windowed_mode: self.display.windowed_mode,
            pin_single_core: self.launch.single_core_affinity,
            shim_executable: self.display.shim_executable.clone(),
            stale_log_files: self.launch.stale_log_files.clone(),
            preprocess_poll_interval: self.preprocessing.poll_interval(),
            preprocess_max_polls: self.preprocessing.max_polls,
        }
    }
}
