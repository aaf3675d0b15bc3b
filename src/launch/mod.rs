//! Game launching
//!
//! Turns a `LaunchConfiguration` into a running game process and reports
//! the process lifecycle to the rest of the client.

pub mod command;
pub mod configuration;
pub mod events;
pub mod launcher;
pub mod notifier;
pub mod preprocess;
pub mod resolver;
pub mod session;

pub use command::LaunchCommand;
pub use configuration::{GameExecutables, LaunchConfiguration};
pub use events::{LifecycleEvent, LifecycleEvents, LifecycleSubscription};
pub use launcher::{GameProcessHandle, GameProcessLauncher, LaunchOutcome, LaunchPhase};
pub use notifier::{LaunchNotifier, LogNotifier};
pub use preprocess::{
    wait_for_preprocessing, BackgroundTask, IniPreprocessor, PreprocessWait, PreprocessingTask,
};
pub use resolver::{resolve_executable, ResolvedExecutable};
pub use session::{LocalSession, SessionManager};
