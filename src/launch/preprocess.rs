//! Preprocessing
//!
//! Configuration files are regenerated in the background before each launch.
//! The launcher waits for the job a bounded number of times and continues
//! even when the job has not finished.

use std::collections::BTreeMap;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An asynchronous one-shot job run before the game starts
pub trait PreprocessingTask: Send + Sync {
    /// Start the job; ignored if it is already running
    fn run(&self);

    fn is_running(&self) -> bool;

    /// Block until the job finishes or `timeout` passes
    ///
    /// Returns true when the job is no longer running.
    fn wait(&self, timeout: Duration) -> bool;

    /// Error message of the most recent run, if it failed
    fn last_error(&self) -> Option<String>;

    /// Human-readable state for diagnostics
    fn describe_state(&self) -> String;
}

/// Result of waiting on a preprocessing task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessWait {
    pub completed: bool,
    /// Number of timed waits performed
    pub polls: u32,
}

/// Wait for `task` with up to `max_polls` waits of `interval` each
pub fn wait_for_preprocessing(
    task: &dyn PreprocessingTask,
    interval: Duration,
    max_polls: u32,
) -> PreprocessWait {
    let mut polls = 0;

    while task.is_running() {
        if polls >= max_polls {
            return PreprocessWait {
                completed: false,
                polls,
            };
        }

        polls += 1;
        if task.wait(interval) {
            break;
        }
        trace!("Preprocessing still running after {} polls", polls);
    }

    PreprocessWait {
        completed: true,
        polls,
    }
}

#[derive(Debug, Default)]
struct TaskStatus {
    running: bool,
    runs: u64,
    last_error: Option<String>,
    last_duration: Option<Duration>,
}

#[derive(Debug, Default)]
struct TaskState {
    status: Mutex<TaskStatus>,
    finished: Condvar,
}

impl TaskState {
    fn finish(&self, error: Option<String>, duration: Option<Duration>) {
        let mut status = self.status.lock();
        status.running = false;
        status.last_error = error;
        status.last_duration = duration;
        self.finished.notify_all();
    }
}

/// Runs a job closure on a worker thread for every `run()`
pub struct BackgroundTask<F> {
    name: String,
    job: Arc<F>,
    state: Arc<TaskState>,
}

impl<F> BackgroundTask<F>
where
    F: Fn() -> Result<()> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, job: F) -> Self {
        Self {
            name: name.into(),
            job: Arc::new(job),
            state: Arc::new(TaskState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of runs started so far
    pub fn run_count(&self) -> u64 {
        self.state.status.lock().runs
    }
}

impl<F> PreprocessingTask for BackgroundTask<F>
where
    F: Fn() -> Result<()> + Send + Sync + 'static,
{
    fn run(&self) {
        {
            let mut status = self.state.status.lock();
            if status.running {
                debug!("{} is already running", self.name);
                return;
            }
            status.running = true;
            status.runs += 1;
        }

        let job = Arc::clone(&self.job);
        let state = Arc::clone(&self.state);
        let name = self.name.clone();

        let spawned = thread::Builder::new()
            .name(format!("{}-worker", self.name))
            .spawn(move || {
                let started = Instant::now();
                let error = match panic::catch_unwind(AssertUnwindSafe(|| job())) {
                    Ok(Ok(())) => None,
                    Ok(Err(e)) => Some(e.to_string()),
                    Err(_) => Some(format!("{} panicked", name)),
                };
                let elapsed = started.elapsed();

                match &error {
                    Some(e) => warn!("{} failed after {:?}: {}", name, elapsed, e),
                    None => debug!("{} finished in {:?}", name, elapsed),
                }

                state.finish(error, Some(elapsed));
            });

        if let Err(e) = spawned {
            error!("Failed to start {} worker: {}", self.name, e);
            self.state
                .finish(Some(format!("failed to start worker: {}", e)), None);
        }
    }

    fn is_running(&self) -> bool {
        self.state.status.lock().running
    }

    fn wait(&self, timeout: Duration) -> bool {
        let mut status = self.state.status.lock();
        self.state
            .finished
            .wait_while_for(&mut status, |status| status.running, timeout);
        !status.running
    }

    fn last_error(&self) -> Option<String> {
        self.state.status.lock().last_error.clone()
    }

    fn describe_state(&self) -> String {
        let status = self.state.status.lock();
        let mut description = format!(
            "{}: {} (runs: {})",
            self.name,
            if status.running { "running" } else { "idle" },
            status.runs
        );
        if let Some(duration) = status.last_duration {
            description.push_str(&format!(", last run took {} ms", duration.as_millis()));
        }
        if let Some(error) = &status.last_error {
            description.push_str(&format!(", last error: {}", error));
        }
        description
    }
}

/// Directory under the game directory holding processed INI files
pub const INI_DIRECTORY: &str = "INI";
/// Unmodified INI files shipped with the game
pub const BASE_DIRECTORY: &str = "Base";
/// Mod or user additions appended to the base files
pub const OVERRIDES_DIRECTORY: &str = "Overrides";
/// Record of the inputs each processed file was built from, kept in `INI/`
pub const PROCESSED_INFO_FILE: &str = ".processed.json";

/// Inputs a processed file was last generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ProcessedEntry {
    has_override: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProcessedInfo {
    files: BTreeMap<String, ProcessedEntry>,
}

impl ProcessedInfo {
    fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Discarding unreadable {}: {}", path.display(), e);
            Self::default()
        })
    }

    fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::PreprocessingFailed {
            reason: format!("cannot write {}: {}", path.display(), e),
        })
    }
}

/// Regenerates `INI/<name>` from `INI/Base/<name>` plus `INI/Overrides/<name>`
#[derive(Debug, Clone)]
pub struct IniPreprocessor {
    game_directory: PathBuf,
}

impl IniPreprocessor {
    pub fn new(game_directory: impl Into<PathBuf>) -> Self {
        Self {
            game_directory: game_directory.into(),
        }
    }

    fn ini_directory(&self) -> PathBuf {
        self.game_directory.join(INI_DIRECTORY)
    }

    /// Regenerate every outdated INI file
    ///
    /// Returns the number of files written.
    pub fn process(&self) -> Result<usize> {
        let ini_dir = self.ini_directory();
        let base_dir = ini_dir.join(BASE_DIRECTORY);
        let overrides_dir = ini_dir.join(OVERRIDES_DIRECTORY);

        if !base_dir.is_dir() {
            debug!("No base INI directory at {}", base_dir.display());
            return Ok(0);
        }

        let info_path = ini_dir.join(PROCESSED_INFO_FILE);
        let previous = ProcessedInfo::load(&info_path);
        let mut current = ProcessedInfo::default();

        let mut written = 0;
        for entry in fs::read_dir(&base_dir)? {
            let base_path = entry?.path();
            if !is_ini_file(&base_path) {
                continue;
            }
            let Some(file_name) = base_path.file_name() else {
                continue;
            };

            let override_path = overrides_dir.join(file_name);
            let override_path = override_path.is_file().then_some(override_path);
            let output_path = ini_dir.join(file_name);
            let key = file_name.to_string_lossy().into_owned();
            let inputs = ProcessedEntry {
                has_override: override_path.is_some(),
            };
            current.files.insert(key.clone(), inputs);

            let recorded = previous.files.get(&key).copied();
            if !needs_regeneration(&output_path, &base_path, override_path.as_deref())?
                && recorded == Some(inputs)
            {
                trace!("{} is up to date", output_path.display());
                continue;
            }

            let mut content = fs::read(&base_path)?;
            if let Some(override_path) = &override_path {
                if !content.is_empty() && !content.ends_with(b"\n") {
                    content.push(b'\n');
                }
                content.extend(fs::read(override_path)?);
            }

            fs::write(&output_path, content).map_err(|e| Error::PreprocessingFailed {
                reason: format!("cannot write {}: {}", output_path.display(), e),
            })?;
            debug!("Regenerated {}", output_path.display());
            written += 1;
        }

        if written > 0 || current.files != previous.files {
            current.save(&info_path)?;
        }

        info!("INI preprocessing wrote {} files", written);
        Ok(written)
    }

    /// Wrap this job in a background task
    pub fn into_task(self) -> BackgroundTask<impl Fn() -> Result<()> + Send + Sync + 'static> {
        BackgroundTask::new("ini-preprocessor", move || self.process().map(|_| ()))
    }
}

fn is_ini_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"))
}

fn modified(path: &Path) -> Result<SystemTime> {
    Ok(fs::metadata(path)?.modified()?)
}

fn needs_regeneration(output: &Path, base: &Path, overrides: Option<&Path>) -> Result<bool> {
    if !output.exists() {
        return Ok(true);
    }

    let output_time = modified(output)?;
    let mut newest_input = modified(base)?;
    if let Some(overrides) = overrides {
        newest_input = newest_input.max(modified(overrides)?);
    }

    Ok(output_time < newest_input)
}
