//! Windows-specific platform implementations

mod paths;
mod process;

pub use paths::WindowsPaths;
pub use process::WindowsProcess;
