// src/tree/observer.rs

//! Change notification plumbing.
//!
//! Commands and groups hold a list of [`StatusObserver`]s and call them
//! synchronously, on the thread that performed the transition. A group
//! subscribes to each of its children and re-emits its own recomputed status
//! to its observers, so a change propagates through any depth of nesting.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::types::{Status, TaskName};

/// Receiver of status-changed and error notifications.
pub trait StatusObserver: Send + Sync {
    /// `source` changed to `status`.
    fn status_changed(&self, source: &str, status: Status);

    /// `source` entered `Error` with the given diagnostic.
    fn failed(&self, source: &str, diagnostic: &str) {
        let _ = (source, diagnostic);
    }
}

/// Hook called after every command notification, for hosts that need to
/// pump their own event loop while a payload blocks the thread.
pub type YieldHook = Arc<dyn Fn() + Send + Sync>;

/// Ordered list of observers; notified in subscription order.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Vec<Arc<dyn StatusObserver>>,
}

impl Observers {
    pub fn push(&mut self, observer: Arc<dyn StatusObserver>) {
        self.inner.push(observer);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn status_changed(&self, source: &str, status: Status) {
        for observer in &self.inner {
            observer.status_changed(source, status);
        }
    }

    pub fn failed(&self, source: &str, diagnostic: &str) {
        for observer in &self.inner {
            observer.failed(source, diagnostic);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observers({})", self.inner.len())
    }
}

/// Owned notification, for consumers that prefer values over callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    StatusChanged { task: TaskName, status: Status },
    Failed { task: TaskName, diagnostic: String },
}

impl TaskEvent {
    pub fn task(&self) -> &str {
        match self {
            TaskEvent::StatusChanged { task, .. } | TaskEvent::Failed { task, .. } => task,
        }
    }
}

/// Forwards notifications as [`TaskEvent`]s over an unbounded channel.
///
/// Sending never blocks, so this is safe to call from inside a running
/// payload's thread; an async host reads the receiver at its own pace.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<TaskEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<TaskEvent>) -> Self {
        Self { tx }
    }

    /// Convenience: create an observer together with its receiving end.
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<TaskEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self::new(tx)), rx)
    }

    fn send(&self, event: TaskEvent) {
        if self.tx.send(event).is_err() {
            debug!("task event receiver dropped; discarding event");
        }
    }
}

impl StatusObserver for ChannelObserver {
    fn status_changed(&self, source: &str, status: Status) {
        self.send(TaskEvent::StatusChanged {
            task: source.to_string(),
            status,
        });
    }

    fn failed(&self, source: &str, diagnostic: &str) {
        self.send(TaskEvent::Failed {
            task: source.to_string(),
            diagnostic: diagnostic.to_string(),
        });
    }
}
