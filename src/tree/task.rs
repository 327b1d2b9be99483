// src/tree/task.rs

//! A single, user-facing task wrapping at most one [`Command`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::exec::{Command, RunOutcome, RunReport, Runnable};
use crate::tree::observer::{Observers, StatusObserver, YieldHook};
use crate::types::{Status, TaskName};

/// A titled task.
///
/// The static `info` text and the error text of the most recent run are kept
/// apart and only combined by [`Task::display_text`], so repeated failures
/// never lose the info.
///
/// A task created with [`Task::new`] has no command yet. Such a placeholder
/// reports no status (`None`), and `enable`/`disable`/`run` do nothing until
/// [`Task::configure`] attaches a payload.
pub struct Task {
    title: TaskName,
    info: String,
    command: Option<Command>,
    error_text: Option<String>,
    observers: Observers,
    yield_hook: Option<YieldHook>,
}

impl Task {
    pub fn new(title: impl Into<TaskName>, info: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            info: info.into(),
            command: None,
            error_text: None,
            observers: Observers::default(),
            yield_hook: None,
        }
    }

    /// Shorthand for `new` followed by `configure`.
    pub fn with_payload(
        title: impl Into<TaskName>,
        info: impl Into<String>,
        payload: impl Runnable + 'static,
    ) -> Self {
        let mut task = Self::new(title, info);
        task.configure(payload);
        task
    }

    /// Attach a fresh command running `payload`, replacing any previous one.
    ///
    /// The command inherits this task's observers, which are told about its
    /// initial `Enabled` status.
    pub fn configure(&mut self, payload: impl Runnable + 'static) {
        self.configure_boxed(Box::new(payload));
    }

    pub fn configure_boxed(&mut self, payload: Box<dyn Runnable>) {
        let mut command = Command::from_boxed(self.title.clone(), payload);
        command.set_observers(self.observers.clone());
        command.set_yield_hook(self.yield_hook.clone());

        debug!(task = %self.title, payload = %command.describe(), "task configured");

        let status = command.status();
        self.command = Some(command);
        self.error_text = None;
        self.observers.status_changed(&self.title, status);
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    /// Mirrors the command's status; `None` for an unconfigured task.
    pub fn status(&self) -> Option<Status> {
        self.command.as_ref().map(Command::status)
    }

    /// The command's most recent diagnostic.
    pub fn last_error(&self) -> Option<&str> {
        self.command.as_ref().and_then(Command::last_error)
    }

    /// Error section shown for the latest run of this task.
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Info text, followed by a labelled error section after a failed run.
    pub fn display_text(&self) -> String {
        match self.error_text {
            Some(ref error) => format!("{}\nError:\n{}", self.info, error),
            None => self.info.clone(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn StatusObserver>) {
        self.observers.push(observer.clone());
        if let Some(ref mut command) = self.command {
            command.subscribe(observer);
        }
    }

    pub fn set_yield_hook(&mut self, hook: Option<YieldHook>) {
        if let Some(ref mut command) = self.command {
            command.set_yield_hook(hook.clone());
        }
        self.yield_hook = hook;
    }

    pub fn enable(&mut self) {
        match self.command {
            Some(ref mut command) => command.enable(),
            None => debug!(task = %self.title, "enable on unconfigured task; ignoring"),
        }
    }

    pub fn disable(&mut self) {
        match self.command {
            Some(ref mut command) => command.disable(),
            None => debug!(task = %self.title, "disable on unconfigured task; ignoring"),
        }
    }

    /// Reset the display text to the info and run the command.
    pub fn run(&mut self) -> RunReport {
        self.error_text = None;

        let Some(ref mut command) = self.command else {
            debug!(task = %self.title, "run on unconfigured task; ignoring");
            return RunOutcome::Skipped.into();
        };

        let outcome = command.run();
        if outcome == RunOutcome::Failed {
            self.error_text = command.last_error().map(str::to_string);
        }
        outcome.into()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("title", &self.title)
            .field("info", &self.info)
            .field("command", &self.command)
            .field("error_text", &self.error_text)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
