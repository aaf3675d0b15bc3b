//! Error types and Result aliases for the client

use std::path::PathBuf;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Process errors ===
    /// Failed to start the game (or shim) process
    #[error("Failed to spawn '{command}': {reason}")]
    ProcessSpawnFailed { command: String, reason: String },

    /// Failed to pin a process to a set of logical processors
    #[error("Failed to set affinity mask {mask:#x} for process {pid}: {reason}")]
    AffinityFailed { pid: u32, mask: u64, reason: String },

    /// Processor affinity cannot be changed on this platform
    #[error("Processor affinity is not supported on {platform}")]
    AffinityNotSupported { platform: String },

    // === Preprocessing errors ===
    /// The preprocessing job reported a failure
    #[error("Preprocessing failed: {reason}")]
    PreprocessingFailed { reason: String },

    // === INI errors ===
    /// Failed to read an INI file
    #[error("Failed to read INI file '{}': {reason}", path.display())]
    IniLoadFailed { path: PathBuf, reason: String },

    /// A required INI section is missing
    #[error("INI section '{section}' not found")]
    IniSectionNotFound { section: String },

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to save configuration file
    #[error("Failed to save config to '{}': {reason}", path.display())]
    ConfigSaveFailed { path: PathBuf, reason: String },

    /// Configuration file not found
    #[error("Configuration file not found")]
    ConfigNotFound,

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    #[error("Failed to serialize config as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    // === Model errors ===
    /// A color string could not be parsed
    #[error("Invalid color '{value}'")]
    InvalidColor { value: String },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // === Generic fallback (use sparingly) ===
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
