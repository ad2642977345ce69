//! CommandSpec and the Job handle.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use scriptdeck_common::{JobError, JobId};
use scriptdeck_terminal::{Interpreter, Transcript};

use crate::events::{JobEvent, JobEvents};
use crate::executor;
use crate::status::JobStatus;

// ---------------------------------------------------------------------------
// CommandSpec
// ---------------------------------------------------------------------------

/// Process invocation parameters, passed through unmodified to the OS.
/// Produced by the (out-of-scope) configuration layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// One external command invocation: owns the process lifecycle, the
/// interpreter fed by its merged output, and the observable status.
///
/// Cloning the handle shares the same underlying job.
#[derive(Clone)]
pub struct Job {
    pub(crate) inner: Arc<JobInner>,
}

pub(crate) struct JobInner {
    pub(crate) id: JobId,
    pub(crate) title: String,
    pub(crate) spec: CommandSpec,
    pub(crate) status: Mutex<JobStatus>,
    /// Mutated only from the job's single relay task (single-writer);
    /// consumers lock briefly for snapshots.
    pub(crate) interpreter: Mutex<Interpreter>,
    pub(crate) events: JobEvents,
    pub(crate) cancel: CancellationToken,
    started: AtomicBool,
    started_at: Mutex<Option<DateTime<Utc>>>,
    started_instant: Mutex<Option<Instant>>,
    pub(crate) elapsed_on_completion: Mutex<Option<Duration>>,
    pub(crate) stdin_tx: Mutex<Option<mpsc::Sender<String>>>,
}

/// Mutex access that shrugs off poisoning: a panicked test thread must not
/// wedge status reads.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Job {
    pub fn new(title: impl Into<String>, spec: CommandSpec) -> Self {
        Self {
            inner: Arc::new(JobInner {
                id: JobId::new(),
                title: title.into(),
                spec,
                status: Mutex::new(JobStatus::NotStarted),
                interpreter: Mutex::new(Interpreter::new()),
                events: JobEvents::default(),
                cancel: CancellationToken::new(),
                started: AtomicBool::new(false),
                started_at: Mutex::new(None),
                started_instant: Mutex::new(None),
                elapsed_on_completion: Mutex::new(None),
                stdin_tx: Mutex::new(None),
            }),
        }
    }

    pub fn id(&self) -> &JobId {
        &self.inner.id
    }

    pub fn title(&self) -> &str {
        &self.inner.title
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.inner.spec
    }

    pub fn status(&self) -> JobStatus {
        *lock(&self.inner.status)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        *lock(&self.inner.started_at)
    }

    /// Wall-clock time since start while Running, or the frozen duration
    /// once a terminal status is reached. None before start.
    pub fn elapsed(&self) -> Option<Duration> {
        if let Some(done) = *lock(&self.inner.elapsed_on_completion) {
            return Some(done);
        }
        lock(&self.inner.started_instant).map(|t| t.elapsed())
    }

    /// Subscribe to status transitions and output appends, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.inner.events.subscribe()
    }

    /// Snapshot of the transcript produced so far.
    pub fn transcript(&self) -> Transcript {
        lock(&self.inner.interpreter).transcript().clone()
    }

    pub fn transcript_text(&self) -> String {
        lock(&self.inner.interpreter).transcript().text()
    }

    /// Start the process. Non-blocking; callable at most once — the second
    /// call is a contract violation and fails fast. All runtime failures
    /// after this point surface as status + transcript text, never as
    /// errors to the caller.
    pub fn run(&self) -> Result<(), JobError> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return Err(JobError::AlreadyStarted);
        }
        *lock(&self.inner.started_at) = Some(Utc::now());
        *lock(&self.inner.started_instant) = Some(Instant::now());
        tokio::spawn(executor::drive(self.inner.clone()));
        Ok(())
    }

    /// Request cooperative cancellation. The job transitions to Cancelled
    /// only once the execution loop has observed the request and torn the
    /// process down. No-op unless the job is Running.
    pub fn cancel(&self) {
        if self.status() == JobStatus::Running {
            self.inner.cancel.cancel();
        }
    }

    /// Forward one line to the child's stdin. Dropped silently when the
    /// process is not running or its stdin is closed.
    pub fn write_input(&self, line: impl Into<String>) {
        if let Some(tx) = lock(&self.inner.stdin_tx).as_ref() {
            let _ = tx.try_send(line.into());
        }
    }
}

impl JobInner {
    pub(crate) fn set_status(&self, status: JobStatus) {
        {
            let mut current = lock(&self.status);
            if !current.can_transition_to(status) {
                return;
            }
            *current = status;
        }
        self.events.publish(JobEvent::Status(status));
    }

    /// Feed process output through the interpreter and notify subscribers.
    pub(crate) fn feed_output(&self, bytes: &[u8]) {
        let elements = {
            let mut interpreter = lock(&self.interpreter);
            interpreter.process(bytes);
            interpreter.transcript().len()
        };
        self.events.publish(JobEvent::Output { elements });
    }

    /// Append one plain-text line to the transcript, bypassing escape-code
    /// interpretation (used for error messages and the run summary).
    pub(crate) fn append_line(&self, text: &str) {
        let elements = {
            let mut interpreter = lock(&self.interpreter);
            for c in text.chars() {
                interpreter.console_mut().put_char(c);
            }
            interpreter.new_line();
            interpreter.transcript().len()
        };
        self.events.publish(JobEvent::Output { elements });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
