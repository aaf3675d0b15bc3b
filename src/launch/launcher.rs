//! Game Process Launcher
//!
//! Runs one launch attempt from preprocessing to process exit:
//!
//! 1. Start preprocessing and wait for it a bounded number of times
//! 2. Resolve the binary and delete stale log files
//! 3. Emit `GameProcessStarting` and spawn the game (directly or via shim)
//! 4. On failure, notify the user and synthesize an exit
//! 5. On success, optionally pin the process to one core and emit
//!    `GameProcessStarted`
//!
//! A watcher thread owns the child and ends the session once it exits.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::platform::{OsVersion, Platform, ProcessOps};

use super::command::LaunchCommand;
use super::configuration::LaunchConfiguration;
use super::events::{LifecycleEvent, LifecycleEvents};
use super::notifier::{launch_failure_message, LaunchNotifier, LogNotifier, LAUNCH_FAILURE_TITLE};
use super::preprocess::{wait_for_preprocessing, PreprocessingTask};
use super::resolver::resolve_executable;
use super::session::SessionManager;

/// Affinity mask selecting the second logical processor
pub const SINGLE_CORE_AFFINITY_MASK: u64 = 0b10;

/// Where the launcher currently is in a launch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LaunchPhase {
    #[default]
    Idle,
    Preprocessing,
    Resolving,
    Starting,
    Running,
    Exited,
}

/// Current phase and the launch attempt that set it
#[derive(Debug, Clone, Copy, Default)]
struct PhaseState {
    phase: LaunchPhase,
    launch: u64,
}

/// A started game process, owned by its exit watcher
#[derive(Debug, Clone)]
pub struct GameProcessHandle {
    /// Launch counter value, unique per launcher
    pub id: u64,
    pub pid: u32,
    pub executable: PathBuf,
    pub arguments: String,
    pub started_at: DateTime<Utc>,
}

/// What happened during `start_game_process`
#[derive(Debug, Clone, Default)]
pub struct LaunchOutcome {
    pub started: bool,
    /// Preprocessing was still running when the wait gave up
    pub preprocessing_failed: bool,
    pub pid: Option<u32>,
    pub command: Option<LaunchCommand>,
    /// OS error text when the process failed to start
    pub error: Option<String>,
}

/// Ends the session and signals the exit, at most once per launch
struct ExitHandler {
    launch: u64,
    fired: AtomicBool,
    session: Arc<dyn SessionManager>,
    events: LifecycleEvents,
    phase: Arc<Mutex<PhaseState>>,
}

impl ExitHandler {
    fn on_process_exited(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            debug!("Exit already handled for this launch");
            return;
        }

        self.set_phase_if_current(LaunchPhase::Exited);
        self.session.end_session();
        self.events.emit(LifecycleEvent::GameProcessExited);
        self.set_phase_if_current(LaunchPhase::Idle);
    }

    /// A later launch owns the phase once it has started
    fn set_phase_if_current(&self, phase: LaunchPhase) {
        let mut state = self.phase.lock();
        if state.launch == self.launch {
            state.phase = phase;
        } else {
            trace!(
                "Launch {} exited while launch {} is {:?}",
                self.launch,
                state.launch,
                state.phase
            );
        }
    }
}

/// Starts the game process and reports its lifecycle
pub struct GameProcessLauncher {
    preprocessor: Arc<dyn PreprocessingTask>,
    notifier: Arc<dyn LaunchNotifier>,
    process_ops: Arc<dyn ProcessOps>,
    events: LifecycleEvents,
    os: OsVersion,
    phase: Arc<Mutex<PhaseState>>,
    next_id: AtomicU64,
}

impl GameProcessLauncher {
    /// Create a launcher for the host platform
    pub fn new(preprocessor: Arc<dyn PreprocessingTask>) -> Self {
        Self {
            preprocessor,
            notifier: Arc::new(LogNotifier),
            process_ops: Arc::from(Platform::process()),
            events: LifecycleEvents::default(),
            os: OsVersion::detect(),
            phase: Arc::new(Mutex::new(PhaseState::default())),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn LaunchNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_process_ops(mut self, process_ops: Arc<dyn ProcessOps>) -> Self {
        self.process_ops = process_ops;
        self
    }

    /// Override the detected operating system family
    pub fn with_os(mut self, os: OsVersion) -> Self {
        self.os = os;
        self
    }

    /// Use a shared event hub instead of a private one
    pub fn with_events(mut self, events: LifecycleEvents) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &LifecycleEvents {
        &self.events
    }

    pub fn os(&self) -> OsVersion {
        self.os
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase.lock().phase
    }

    fn set_phase(&self, launch: u64, phase: LaunchPhase) {
        trace!("Launch {} phase: {:?}", launch, phase);
        *self.phase.lock() = PhaseState { phase, launch };
    }

    /// Run one launch attempt
    ///
    /// Never fails; a start failure is reported through the notifier, the
    /// `GameProcessExited` event and the returned outcome.
    pub fn start_game_process(
        &self,
        session: Arc<dyn SessionManager>,
        config: &LaunchConfiguration,
    ) -> LaunchOutcome {
        let mut outcome = LaunchOutcome::default();
        let launch = self.next_id.fetch_add(1, Ordering::SeqCst);

        self.set_phase(launch, LaunchPhase::Preprocessing);
        outcome.preprocessing_failed = !self.run_preprocessing(config);

        self.set_phase(launch, LaunchPhase::Resolving);
        let resolved = resolve_executable(self.os, &config.executables);
        debug!(
            "Resolved executable {} (marker: {:?})",
            resolved.binary, resolved.inner_marker
        );
        delete_stale_logs(&config.game_directory, &config.stale_log_files);

        let exit = Arc::new(ExitHandler {
            launch,
            fired: AtomicBool::new(false),
            session,
            events: self.events.clone(),
            phase: Arc::clone(&self.phase),
        });

        self.events.emit(LifecycleEvent::GameProcessStarting);
        self.set_phase(launch, LaunchPhase::Starting);

        let command = LaunchCommand::build(config, &resolved);
        info!(
            "Launching {} with arguments {}",
            command.program.display(),
            command.arguments
        );

        let child = match command.to_command().spawn() {
            Ok(child) => child,
            Err(e) => {
                self.report_start_failure(&command, &e);
                exit.on_process_exited();
                outcome.error = Some(e.to_string());
                outcome.command = Some(command);
                return outcome;
            }
        };

        let handle = GameProcessHandle {
            id: launch,
            pid: child.id(),
            executable: command.program.clone(),
            arguments: command.arguments.clone(),
            started_at: Utc::now(),
        };

        if config.pin_single_core && self.process_ops.logical_processor_count() > 1 {
            match self
                .process_ops
                .set_affinity(handle.pid, SINGLE_CORE_AFFINITY_MASK)
            {
                Ok(()) => debug!("Pinned process {} to the second core", handle.pid),
                Err(e) => warn!("Could not pin process {}: {}", handle.pid, e),
            }
        }

        outcome.started = true;
        outcome.pid = Some(handle.pid);

        self.set_phase(launch, LaunchPhase::Running);
        self.events.emit(LifecycleEvent::GameProcessStarted);
        info!("Waiting for {} to exit.", command.program_name());

        outcome.command = Some(command);
        watch_process(child, handle, exit);

        outcome
    }

    /// Returns true if preprocessing finished within the wait bound
    fn run_preprocessing(&self, config: &LaunchConfiguration) -> bool {
        self.preprocessor.run();
        let wait = wait_for_preprocessing(
            self.preprocessor.as_ref(),
            config.preprocess_poll_interval,
            config.preprocess_max_polls,
        );

        let last_error = self.preprocessor.last_error();
        if !wait.completed {
            warn!(
                "Preprocessing did not finish after {} polls, starting the game anyway",
                wait.polls
            );
            if let Some(error) = &last_error {
                warn!("Last preprocessing error: {}", error);
            }
            warn!("Preprocessing state: {}", self.preprocessor.describe_state());
        }
        if let Some(error) = &last_error {
            debug!("Preprocessing reported: {}", error);
        }

        wait.completed
    }

    fn report_start_failure(&self, command: &LaunchCommand, error: &io::Error) {
        let failure = Error::ProcessSpawnFailed {
            command: command.to_string(),
            reason: error.to_string(),
        };
        error!("{}", failure);
        self.notifier.launch_failed(
            LAUNCH_FAILURE_TITLE,
            &launch_failure_message(&command.program_name(), &error.to_string()),
        );
    }
}

/// Wait for the child on a dedicated thread and fire the exit handler
fn watch_process(mut child: Child, handle: GameProcessHandle, exit: Arc<ExitHandler>) {
    let fallback = Arc::clone(&exit);
    let spawned = thread::Builder::new()
        .name(format!("game-process-{}", handle.id))
        .spawn(move || {
            match child.wait() {
                Ok(status) => info!(
                    "Game process {} (launch {}) exited with {} after {}s",
                    handle.pid,
                    handle.id,
                    status,
                    (Utc::now() - handle.started_at).num_seconds()
                ),
                Err(e) => warn!("Failed to wait for game process {}: {}", handle.pid, e),
            }
            exit.on_process_exited();
        });

    if let Err(e) = spawned {
        // Child keeps running detached
        error!("Failed to start exit watcher: {}", e);
        fallback.on_process_exited();
    }
}

/// Remove log files left over from the previous session
fn delete_stale_logs(game_directory: &Path, file_names: &[String]) {
    for name in file_names {
        let path = game_directory.join(name);
        match fs::remove_file(&path) {
            Ok(()) => debug!("Deleted {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!("Could not delete {}: {}", path.display(), e),
        }
    }
}
