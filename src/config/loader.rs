//! Configuration File Loading
//!
//! Handles loading and saving the client configuration from the usual
//! locations, in TOML or JSON, with validation and fallback to defaults.

use super::ClientConfig;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory name used in every search path
const APP_DIR: &str = "cncclient";

/// Configuration file stem inside a search directory
const CONFIG_STEM: &str = "config";

/// Configuration file loader
pub struct ConfigLoader {
    /// Directories searched for `config.toml` / `config.json`
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats, in lookup order
    supported_formats: Vec<ConfigFormat>,
    /// Path the configuration was loaded from, if any
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    /// Format implied by a file extension; anything unknown is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<ClientConfig> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Load configuration from the search paths
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<ClientConfig> {
        if let Some((path, config)) = self.find_and_load_config() {
            info!("Loaded configuration from {}", path.display());
            self.current_path = Some(path);

            if options.validate {
                validate_config(&config)?;
            }
            return Ok(config);
        }

        if options.create_default {
            debug!("No configuration file found, using defaults");
            let config = ClientConfig::default();
            if options.validate {
                validate_config(&config)?;
            }
            Ok(config)
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from_path(&mut self, path: &Path) -> Result<ClientConfig> {
        if !path.is_file() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let config = self.load_config_file(path, ConfigFormat::from_path(path))?;
        validate_config(&config)?;
        info!("Loaded configuration from {}", path.display());
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &ClientConfig) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);

        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path, choosing the format by extension
    pub fn save_to_path(&self, config: &ClientConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::ConfigSaveFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let format = ConfigFormat::from_path(path);
        let serialization_failed = |reason: String| Error::ConfigSerializationFailed {
            format: format.name().to_string(),
            reason,
        };
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| serialization_failed(e.to_string()))?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| serialization_failed(e.to_string()))?
            }
        };

        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Find and load configuration from search paths; first match wins
    fn find_and_load_config(&self) -> Option<(PathBuf, ClientConfig)> {
        for dir in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = Self::get_config_path_for_format(dir, *format);
                if !config_path.exists() {
                    continue;
                }

                match self.load_config_file(&config_path, *format) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        // Keep searching
                        warn!(
                            "Failed to load config from {}: {}",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }

        None
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<ClientConfig> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parse_failed = |reason: String| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason,
        };
        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| parse_failed(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_failed(e.to_string()))
            }
        }
    }

    /// Get configuration file path for a specific format
    fn get_config_path_for_format(dir: &Path, format: ConfigFormat) -> PathBuf {
        dir.join(CONFIG_STEM).with_extension(format.extension())
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        use crate::platform::Platform;

        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            if !xdg_config.is_empty() {
                paths.push(PathBuf::from(xdg_config).join(APP_DIR));
            }
        }

        if let Ok(config_dir) = Platform::paths().config_dir() {
            let dir = config_dir.join(APP_DIR);
            if !paths.contains(&dir) {
                paths.push(dir);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", APP_DIR)));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(format!(".{}", APP_DIR)));
        }

        paths
    }

    /// Get the default configuration path
    fn get_default_config_path() -> PathBuf {
        use crate::platform::Platform;

        Platform::paths()
            .config_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_STEM)
            .with_extension(ConfigFormat::Toml.extension())
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate configuration
pub fn validate_config(config: &ClientConfig) -> Result<()> {
    let executables = &config.game.executables;

    if executables.executable_name.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "game.executable_name".to_string(),
            reason: "Executable name cannot be empty".to_string(),
        });
    }

    if executables.unix_executable_name.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "game.unix_executable_name".to_string(),
            reason: "Unix executable name cannot be empty".to_string(),
        });
    }

    if config.display.use_display_shim && config.display.shim_executable.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "display.shim_executable".to_string(),
            reason: "Shim executable cannot be empty when the shim is enabled".to_string(),
        });
    }

    let interval = config.preprocessing.poll_interval_ms;
    if interval == 0 {
        return Err(Error::ConfigValidationFailed {
            field: "preprocessing.poll_interval_ms".to_string(),
            reason: "Poll interval must be at least 1 ms".to_string(),
        });
    }

    if interval > 60_000 {
        return Err(Error::ConfigValidationFailed {
            field: "preprocessing.poll_interval_ms".to_string(),
            reason: "Poll interval cannot exceed 60 seconds".to_string(),
        });
    }

    let polls = config.preprocessing.max_polls;
    if polls == 0 || polls > 600 {
        return Err(Error::ConfigValidationFailed {
            field: "preprocessing.max_polls".to_string(),
            reason: "Max polls must be between 1 and 600".to_string(),
        });
    }

    Ok(())
}
