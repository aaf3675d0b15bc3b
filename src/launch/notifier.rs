//! Launch failure notification
//!
//! A failed start is shown to the user as a blocking OK-only dialog. The UI
//! layer provides the dialog; the library only formats the text.

/// Title of the launch failure dialog
pub const LAUNCH_FAILURE_TITLE: &str = "Error launching game";

/// Shows a launch failure to the user
pub trait LaunchNotifier: Send + Sync {
    fn launch_failed(&self, title: &str, message: &str);
}

/// Notifier that writes the failure to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LaunchNotifier for LogNotifier {
    fn launch_failed(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }
}

/// Body text of the launch failure dialog
pub fn launch_failure_message(executable: &str, error: &str) -> String {
    format!(
        "Error launching {}. Please check that your anti-virus isn't blocking the client. \
         You can also try running the client as an administrator.\n\n\
         You are unable to participate in this match.\n\n\
         Returned error: {}",
        executable, error
    )
}
