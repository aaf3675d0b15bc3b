//! Launch Configuration
//!
//! Everything a single launch attempt needs, captured at call time so a
//! launch never reads process-wide settings while it runs.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default shim that applies a display mode before starting the game
pub const DEFAULT_SHIM_EXECUTABLE: &str = "qres.dat";

/// Log files the game leaves behind from the previous session
pub const DEFAULT_STALE_LOG_FILES: [&str; 3] = ["DTA.LOG", "TI.LOG", "TS.LOG"];

/// Default wait between preprocessing polls
pub const DEFAULT_PREPROCESS_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of preprocessing polls before giving up
pub const DEFAULT_PREPROCESS_MAX_POLLS: u32 = 10;

/// Executable names used by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameExecutables {
    /// Game executable on Windows
    pub executable_name: String,
    /// Game executable (or start script) on Unix hosts
    pub unix_executable_name: String,
    /// Optional launcher that starts the game executable for us
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher_executable_name: Option<String>,
}

impl Default for GameExecutables {
    fn default() -> Self {
        Self {
            executable_name: "game.exe".to_string(),
            unix_executable_name: "game.sh".to_string(),
            launcher_executable_name: None,
        }
    }
}

/// Per-launch settings
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfiguration {
    /// Directory the game binaries live in; also the working directory
    pub game_directory: PathBuf,
    pub executables: GameExecutables,
    /// Appended verbatim after `-SPAWN`
    pub extra_command_line: String,
    pub use_display_shim: bool,
    pub windowed_mode: bool,
    /// Pin the game to the second logical core
    pub pin_single_core: bool,
    /// Shim file name, resolved against the game directory
    pub shim_executable: String,
    /// File names deleted from the game directory before launch
    pub stale_log_files: Vec<String>,
    pub preprocess_poll_interval: Duration,
    pub preprocess_max_polls: u32,
}

impl LaunchConfiguration {
    /// Create a configuration for the given game directory with defaults
    pub fn new(game_directory: impl Into<PathBuf>) -> Self {
        Self {
            game_directory: game_directory.into(),
            ..Default::default()
        }
    }

    /// Whether the launch goes through the display shim
    pub fn launches_via_shim(&self) -> bool {
        self.windowed_mode && self.use_display_shim
    }
}

impl Default for LaunchConfiguration {
    fn default() -> Self {
        Self {
            game_directory: PathBuf::from("."),
            executables: GameExecutables::default(),
            extra_command_line: String::new(),
            use_display_shim: false,
            windowed_mode: false,
            pin_single_core: false,
            shim_executable: DEFAULT_SHIM_EXECUTABLE.to_string(),
            stale_log_files: DEFAULT_STALE_LOG_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preprocess_poll_interval: DEFAULT_PREPROCESS_POLL_INTERVAL,
            preprocess_max_polls: DEFAULT_PREPROCESS_MAX_POLLS,
        }
    }
}
