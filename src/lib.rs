//! cncclient - launcher client core for a multiplayer game community platform
//!
//! This library provides the non-UI core of the game launcher client:
//! starting the game process and tracking its lifecycle, reading mission
//! metadata from the game's INI files, and modelling chat messages from the
//! IRC-based online service.
//!
//! ## Module Organization
//!
//! - [`launch`] - Process launcher, executable resolver, preprocessing,
//!   lifecycle events
//! - [`models`] - Missions, conditional unlocks, mission catalog, IRC messages
//! - [`ini`] - INI document reader used by the game data files
//! - [`config`] - Configuration loading and validation
//! - [`platform`] - OS abstractions (processor affinity, directories)
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use cncclient::launch::{GameProcessLauncher, IniPreprocessor, LocalSession};
//!
//! # fn main() -> cncclient::Result<()> {
//! let config = cncclient::init()?;
//! let launch = config.launch_configuration();
//!
//! let preprocessor = Arc::new(IniPreprocessor::new(&launch.game_directory).into_task());
//! let launcher = GameProcessLauncher::new(preprocessor).with_os(config.os());
//! let outcome = launcher.start_game_process(Arc::new(LocalSession::new()), &launch);
//! println!("started: {}", outcome.started);
//! # Ok(())
//! # }
//! ```
//!
//! ## Threading
//!
//! A launch runs on the caller's thread and blocks while it waits for
//! preprocessing (bounded). Preprocessing runs on a worker thread, and each
//! started game gets a watcher thread that reports its exit.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod ini;
pub mod launch;
pub mod models;
pub mod platform;

use std::path::Path;

// Re-exports for core functionality
pub use config::{ClientConfig, ConfigLoader};
pub use error::{Error, Result};
pub use launch::{GameProcessLauncher, LaunchConfiguration, LaunchOutcome, LifecycleEvent};
pub use models::{Color, IrcMessage, Mission, MissionCatalog};
pub use platform::OsVersion;

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize the client with configuration from the default locations
///
/// Falls back to the default configuration when loading fails.
pub fn init() -> Result<ClientConfig> {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            ClientConfig::default()
        }
    };

    log_environment(&config);
    Ok(config)
}

/// Initialize the client with configuration from a specific file
///
/// Unlike [`init`], a missing or invalid file is an error.
pub fn init_with_config(path: &Path) -> Result<ClientConfig> {
    info!("Initializing {} v{} with {}", NAME, VERSION, path.display());

    let config = ConfigLoader::new().load_from_path(path)?;
    log_environment(&config);
    Ok(config)
}

fn log_environment(config: &ClientConfig) {
    debug!(
        "Host: {}, launching for: {}, logical processors: {}",
        OsVersion::detect(),
        config.os(),
        platform::available_processors()
    );

    if !config.game.directory.is_dir() {
        warn!(
            "Game directory {} does not exist",
            config.game.directory.display()
        );
    }
}
