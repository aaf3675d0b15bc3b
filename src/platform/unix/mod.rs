//! Unix-specific platform implementations

mod paths;
mod process;

pub use paths::UnixPaths;
pub use process::UnixProcess;
