//! Observer that records every notification it receives.

use std::sync::{Arc, Mutex};

use tasktree::tree::{StatusObserver, TaskEvent};
use tasktree::Status;

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TaskEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every event whose source is `task`, in order.
    pub fn events_of(&self, task: &str) -> Vec<TaskEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.task() == task)
            .collect()
    }

    /// Statuses reported by `task`, in order.
    pub fn statuses_of(&self, task: &str) -> Vec<Status> {
        self.events_of(task)
            .into_iter()
            .filter_map(|e| match e {
                TaskEvent::StatusChanged { status, .. } => Some(status),
                TaskEvent::Failed { .. } => None,
            })
            .collect()
    }

    /// Diagnostics reported by `task`, in order.
    pub fn failures_of(&self, task: &str) -> Vec<String> {
        self.events_of(task)
            .into_iter()
            .filter_map(|e| match e {
                TaskEvent::Failed { diagnostic, .. } => Some(diagnostic),
                TaskEvent::StatusChanged { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl StatusObserver for RecordingObserver {
    fn status_changed(&self, source: &str, status: Status) {
        self.events.lock().unwrap().push(TaskEvent::StatusChanged {
            task: source.to_string(),
            status,
        });
    }

    fn failed(&self, source: &str, diagnostic: &str) {
        self.events.lock().unwrap().push(TaskEvent::Failed {
            task: source.to_string(),
            diagnostic: diagnostic.to_string(),
        });
    }
}
