//! Mock collaborators for launcher tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use cncclient::error::{Error, Result};
use cncclient::launch::{LaunchNotifier, PreprocessingTask, SessionManager};
use cncclient::platform::ProcessOps;

/// Preprocessing that never finishes
#[derive(Default)]
pub struct StuckPreprocessor {
    runs: AtomicU32,
    waits: AtomicU32,
}

impl StuckPreprocessor {
    pub fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn waits(&self) -> u32 {
        self.waits.load(Ordering::SeqCst)
    }
}

impl PreprocessingTask for StuckPreprocessor {
    fn run(&self) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        true
    }

    fn wait(&self, timeout: Duration) -> bool {
        self.waits.fetch_add(1, Ordering::SeqCst);
        thread::sleep(timeout);
        false
    }

    fn last_error(&self) -> Option<String> {
        Some("rules.ini is locked".to_string())
    }

    fn describe_state(&self) -> String {
        "stuck".to_string()
    }
}

/// Preprocessing that completes as soon as it is run
#[derive(Default)]
pub struct InstantPreprocessor {
    runs: AtomicU32,
}

impl InstantPreprocessor {
    pub fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

impl PreprocessingTask for InstantPreprocessor {
    fn run(&self) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        false
    }

    fn wait(&self, _timeout: Duration) -> bool {
        true
    }

    fn last_error(&self) -> Option<String> {
        None
    }

    fn describe_state(&self) -> String {
        "idle".to_string()
    }
}

/// Session manager that counts `end_session` calls
#[derive(Default)]
pub struct RecordingSession {
    ended: AtomicU32,
}

impl RecordingSession {
    pub fn ended(&self) -> u32 {
        self.ended.load(Ordering::SeqCst)
    }
}

impl SessionManager for RecordingSession {
    fn end_session(&self) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that keeps every (title, message) pair
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().clone()
    }
}

impl LaunchNotifier for RecordingNotifier {
    fn launch_failed(&self, title: &str, message: &str) {
        self.notifications
            .lock()
            .push((title.to_string(), message.to_string()));
    }
}

/// Process operations with a fixed core count that record affinity calls
pub struct MockProcessOps {
    cores: usize,
    fail: bool,
    calls: Mutex<Vec<(u32, u64)>>,
}

impl MockProcessOps {
    pub fn new(cores: usize) -> Self {
        Self {
            cores,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(cores: usize) -> Self {
        Self {
            fail: true,
            ..Self::new(cores)
        }
    }

    pub fn affinity_calls(&self) -> Vec<(u32, u64)> {
        self.calls.lock().clone()
    }
}

impl ProcessOps for MockProcessOps {
    fn logical_processor_count(&self) -> usize {
        self.cores
    }

    fn set_affinity(&self, pid: u32, mask: u64) -> Result<()> {
        self.calls.lock().push((pid, mask));
        if self.fail {
            Err(Error::AffinityFailed {
                pid,
                mask,
                reason: "access denied".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
