//! Platform-specific operation traits
//!
//! These traits define the interface for platform-specific operations,
//! allowing for clean abstraction and easier testing.

use crate::error::Result;
use std::path::PathBuf;

/// Platform-specific process operations
pub trait ProcessOps: Send + Sync {
    /// Number of logical processors on the host
    fn logical_processor_count(&self) -> usize;

    /// Restrict a running process to the processors set in `mask`
    ///
    /// Bit `n` of the mask selects logical processor `n`.
    fn set_affinity(&self, pid: u32, mask: u64) -> Result<()>;
}

/// Platform-specific path operations
pub trait PathOps: Send + Sync {
    /// Per-user configuration base directory
    fn config_dir(&self) -> Result<PathBuf>;
}
