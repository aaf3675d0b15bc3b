//! Executable Resolver
//!
//! Picks the binary to start and the marker that tells a launcher shim which
//! game executable to run.

use crate::platform::OsVersion;

use super::configuration::GameExecutables;

/// Binary to start and the prefix placed before `-SPAWN`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub binary: String,
    /// Empty, or the quoted game executable followed by a space
    pub inner_marker: String,
}

/// Resolve the binary for the given host
///
/// Unix hosts always start the Unix executable and ignore any launcher.
pub fn resolve_executable(os: OsVersion, executables: &GameExecutables) -> ResolvedExecutable {
    if os.is_unix() {
        return ResolvedExecutable {
            binary: executables.unix_executable_name.clone(),
            inner_marker: String::new(),
        };
    }

    match executables
        .launcher_executable_name
        .as_deref()
        .filter(|name| !name.is_empty())
    {
        Some(launcher) => ResolvedExecutable {
            binary: launcher.to_string(),
            inner_marker: format!("\"{}\" ", executables.executable_name),
        },
        None => ResolvedExecutable {
            binary: executables.executable_name.clone(),
            inner_marker: String::new(),
        },
    }
}
