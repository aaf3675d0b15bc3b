//! Game command line construction
//!
//! The game is started either directly or through the display shim. Both
//! forms end with the `-SPAWN` flag followed by the user's extra arguments.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::configuration::LaunchConfiguration;
use super::resolver::ResolvedExecutable;

/// Flag that makes the game join the negotiated match
pub const SPAWN_FLAG: &str = "-SPAWN";

/// Shim directive: 16-bit color, then run the quoted program
pub const SHIM_DIRECTIVE: &str = "c=16 /R";

/// Arguments for a direct launch: `<marker>-SPAWN[ <extra>]`
pub fn spawn_arguments(inner_marker: &str, extra: &str) -> String {
    let mut arguments = format!("{}{}", inner_marker, SPAWN_FLAG);
    if !extra.is_empty() {
        arguments.push(' ');
        arguments.push_str(extra);
    }
    arguments
}

/// Arguments for a shim launch: `c=16 /R "<binary path>" <marker>-SPAWN[ <extra>]`
pub fn shim_arguments(binary_path: &Path, inner_marker: &str, extra: &str) -> String {
    format!(
        "{} \"{}\" {}",
        SHIM_DIRECTIVE,
        binary_path.display(),
        spawn_arguments(inner_marker, extra)
    )
}

/// Split an argument string into argv
///
/// Whitespace separates arguments; double quotes group and are removed.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in arguments.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    result.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        result.push(current);
    }

    result
}

/// A fully resolved game command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    /// Argument string as passed to the program
    pub arguments: String,
    pub working_directory: PathBuf,
    pub via_shim: bool,
}

impl LaunchCommand {
    /// Build the command for a launch attempt
    pub fn build(config: &LaunchConfiguration, resolved: &ResolvedExecutable) -> Self {
        let binary_path = config.game_directory.join(&resolved.binary);

        if config.launches_via_shim() {
            Self {
                program: config.game_directory.join(&config.shim_executable),
                arguments: shim_arguments(
                    &binary_path,
                    &resolved.inner_marker,
                    &config.extra_command_line,
                ),
                working_directory: config.game_directory.clone(),
                via_shim: true,
            }
        } else {
            Self {
                program: binary_path,
                arguments: spawn_arguments(&resolved.inner_marker, &config.extra_command_line),
                working_directory: config.game_directory.clone(),
                via_shim: false,
            }
        }
    }

    /// Name of the program file, for log and dialog text
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Create the OS command; no shell is involved
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.current_dir(&self.working_directory);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.raw_arg(&self.arguments);
        }

        #[cfg(not(windows))]
        {
            command.args(split_arguments(&self.arguments));
        }

        command
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program.display(), self.arguments)
    }
}
