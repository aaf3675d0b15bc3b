//! Platform abstraction layer
//!
//! This module provides a unified interface for the OS-level capabilities the
//! launcher needs: process affinity, logical processor count and well-known
//! directories. It also identifies the host operating system family, which
//! decides how the game executable is resolved.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use serde::{Deserialize, Serialize};

pub use traits::*;

/// Operating system family the client runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsVersion {
    /// Native Windows host
    Windows,
    /// POSIX-like host (Linux, macOS, BSD)
    Unix,
}

impl OsVersion {
    /// Detect the operating system family of the running host
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsVersion::Windows
        } else {
            OsVersion::Unix
        }
    }

    /// Whether this is a POSIX-like host
    pub fn is_unix(self) -> bool {
        matches!(self, OsVersion::Unix)
    }
}

impl std::fmt::Display for OsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsVersion::Windows => write!(f, "windows"),
            OsVersion::Unix => write!(f, "unix"),
        }
    }
}

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific process operations
    pub fn process() -> Box<dyn ProcessOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixProcess::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsProcess::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPaths::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPaths::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}

/// Number of logical processors available to this process, never less than one
pub fn available_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
