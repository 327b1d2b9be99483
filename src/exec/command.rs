// src/exec/command.rs

//! Per-command state machine.
//!
//! ```text
//!             enable()                 disable()
//!   any ───────────────► Enabled   any ─────────► Disabled
//!
//!   run():  Disabled ─► (no-op)
//!           other    ─► Running ─┬─► Done    (payload returned Ok)
//!                                └─► Error   (payload returned Err or panicked)
//! ```
//!
//! Every transition notifies the command's observers exactly once. Entering
//! `Error` additionally sends one `failed` notification with the diagnostic.
//! Payload failures stop here: `run()` never returns an error and never
//! unwinds into the caller.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::PayloadFailure;
use crate::exec::payload::Runnable;
use crate::tree::observer::{Observers, StatusObserver, YieldHook};
use crate::types::{Status, TaskName};

/// Result of a single `run()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The command was disabled (or not configured) and nothing ran.
    Skipped,
    Succeeded,
    Failed,
}

/// Counts of outcomes over one or more `run()` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunReport {
    pub fn merge(&mut self, other: RunReport) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }

    /// Number of payloads that were actually invoked.
    pub fn executed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl From<RunOutcome> for RunReport {
    fn from(outcome: RunOutcome) -> Self {
        let mut report = RunReport::default();
        match outcome {
            RunOutcome::Skipped => report.skipped = 1,
            RunOutcome::Succeeded => report.succeeded = 1,
            RunOutcome::Failed => report.failed = 1,
        }
        report
    }
}

/// One runnable payload plus its status and most recent failure.
pub struct Command {
    label: TaskName,
    payload: Box<dyn Runnable>,
    status: Status,
    last_error: Option<String>,
    observers: Observers,
    yield_hook: Option<YieldHook>,
}

impl Command {
    /// Create a command in the `Enabled` state.
    ///
    /// `label` identifies the command in notifications and logs; tasks pass
    /// their own title.
    pub fn new(label: impl Into<TaskName>, payload: impl Runnable + 'static) -> Self {
        Self::from_boxed(label, Box::new(payload))
    }

    pub fn from_boxed(label: impl Into<TaskName>, payload: Box<dyn Runnable>) -> Self {
        Self {
            label: label.into(),
            payload,
            status: Status::Enabled,
            last_error: None,
            observers: Observers::default(),
            yield_hook: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Diagnostic of the most recent failing run, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn describe(&self) -> String {
        self.payload.describe()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    /// Replace the observer list wholesale (used by `Task::configure`).
    pub(crate) fn set_observers(&mut self, observers: Observers) {
        self.observers = observers;
    }

    /// Hook called after every notification so an event-driven host can
    /// pump its own loop while a payload blocks.
    pub fn set_yield_hook(&mut self, hook: Option<YieldHook>) {
        self.yield_hook = hook;
    }

    pub fn enable(&mut self) {
        self.set_status(Status::Enabled);
    }

    pub fn disable(&mut self) {
        self.set_status(Status::Disabled);
    }

    /// Run the payload unless the command is disabled.
    ///
    /// Blocks for the full duration of the payload.
    pub fn run(&mut self) -> RunOutcome {
        if self.status == Status::Disabled {
            debug!(task = %self.label, "command disabled; skipping run");
            return RunOutcome::Skipped;
        }

        info!(task = %self.label, "running command");
        self.set_status(Status::Running);

        match self.invoke_payload() {
            Ok(()) => {
                self.last_error = None;
                self.set_status(Status::Done);
                info!(task = %self.label, "command finished");
                RunOutcome::Succeeded
            }
            Err(failure) => {
                let diagnostic = failure.diagnostic();
                warn!(task = %self.label, error = %diagnostic, "command failed");
                self.last_error = Some(diagnostic);
                self.set_status(Status::Error);
                if let Some(ref diagnostic) = self.last_error {
                    self.observers.failed(&self.label, diagnostic);
                }
                RunOutcome::Failed
            }
        }
    }

    fn invoke_payload(&mut self) -> Result<(), PayloadFailure> {
        let payload = &mut self.payload;
        match panic::catch_unwind(AssertUnwindSafe(|| payload.invoke())) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(PayloadFailure::Failed(err)),
            Err(panic) => Err(PayloadFailure::Panicked(panic_message(panic.as_ref()))),
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        debug!(task = %self.label, %status, "command status changed");
        self.observers.status_changed(&self.label, status);
        if let Some(ref hook) = self.yield_hook {
            hook();
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("label", &self.label)
            .field("payload", &self.payload.describe())
            .field("status", &self.status)
            .field("last_error", &self.last_error)
            .field("observers", &self.observers)
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
