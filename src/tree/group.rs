// src/tree/group.rs

//! Ordered groups of tasks with a rolled-up status.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, trace, warn};

use crate::config::model::TaskDescription;
use crate::errors::Result;
use crate::exec::RunReport;
use crate::tree::node::TaskNode;
use crate::tree::observer::{Observers, StatusObserver, YieldHook};
use crate::types::{Status, TaskName};

/// An ordered collection of tasks and nested groups.
///
/// The group keeps a mirror of each child's last reported status and
/// recomputes its own status as [`Status::dominant`] of that mirror on every
/// child notification. When the result changes, the group notifies its own
/// observers, which include its parent group if it has one.
pub struct TaskGroup {
    title: TaskName,
    info: String,
    children: Vec<TaskNode>,
    shared: Arc<GroupShared>,
    /// Handed to every child, including ones added after it was set.
    yield_hook: Option<YieldHook>,
}

impl fmt::Debug for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskGroup")
            .field("title", &self.title)
            .field("info", &self.info)
            .field("children", &self.children)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

/// State reachable from the observers registered on children.
#[derive(Debug)]
struct GroupShared {
    title: TaskName,
    state: Mutex<GroupState>,
}

#[derive(Debug)]
struct GroupState {
    /// One slot per child, in insertion order. `None` for an unconfigured task.
    slots: Vec<Option<Status>>,
    status: Status,
    observers: Observers,
}

impl GroupShared {
    fn lock(&self) -> MutexGuard<'_, GroupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` to the state, recompute, and notify if the status moved.
    ///
    /// Observers are called after the lock is released.
    fn update_and_recompute(&self, update: impl FnOnce(&mut GroupState)) {
        let (status, observers) = {
            let mut state = self.lock();
            update(&mut state);
            let next = Status::dominant(state.slots.iter().flatten().copied());
            if next == state.status {
                return;
            }
            debug!(group = %self.title, from = %state.status, to = %next, "group status changed");
            state.status = next;
            (next, state.observers.clone())
        };

        observers.status_changed(&self.title, status);
    }

    fn child_changed(&self, index: usize, status: Status) {
        self.update_and_recompute(|state| match state.slots.get_mut(index) {
            Some(slot) => *slot = Some(status),
            None => warn!(index, "status from unknown child slot; ignoring"),
        });
    }
}

/// Observer a group registers on one of its children.
struct ChildSlot {
    group: Weak<GroupShared>,
    index: usize,
}

impl StatusObserver for ChildSlot {
    fn status_changed(&self, source: &str, status: Status) {
        match self.group.upgrade() {
            Some(group) => group.child_changed(self.index, status),
            None => trace!(task = %source, "owning group dropped; ignoring child status"),
        }
    }

    // Diagnostics stay with the failing task; only the status rolls up.
}

impl TaskGroup {
    /// An empty group; its status is `Enabled` until children are added.
    pub fn new(title: impl Into<TaskName>, info: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            shared: Arc::new(GroupShared {
                title: title.clone(),
                state: Mutex::new(GroupState {
                    slots: Vec::new(),
                    status: Status::Enabled,
                    observers: Observers::default(),
                }),
            }),
            title,
            info: info.into(),
            children: Vec::new(),
            yield_hook: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// Groups carry no diagnostic of their own; their display text is the info.
    pub fn display_text(&self) -> String {
        self.info.clone()
    }

    pub fn status(&self) -> Status {
        self.shared.lock().status
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[TaskNode] {
        &self.children
    }

    /// Append a task or group and start following its status.
    ///
    /// Returns the stored child so the caller can keep working with it.
    pub fn add_task(&mut self, task: impl Into<TaskNode>) -> &mut TaskNode {
        let mut node = task.into();
        let index = self.children.len();

        node.subscribe(Arc::new(ChildSlot {
            group: Arc::downgrade(&self.shared),
            index,
        }));

        if self.yield_hook.is_some() {
            node.set_yield_hook(self.yield_hook.clone());
        }

        debug!(group = %self.title, task = %node.title(), index, "adding task to group");

        let initial = node.status();
        self.children.push(node);
        self.shared
            .update_and_recompute(|state| state.slots.push(initial));

        &mut self.children[index]
    }

    /// Build a task or group from `description` and add it.
    pub fn add_description(&mut self, description: &TaskDescription) -> Result<&mut TaskNode> {
        let node = TaskNode::from_description(description)?;
        Ok(self.add_task(node))
    }

    /// Subscribe to this group's own status changes.
    pub fn subscribe(&mut self, observer: Arc<dyn StatusObserver>) {
        self.shared.lock().observers.push(observer);
    }

    /// Subscribe to this group and every node below it.
    pub fn subscribe_all(&mut self, observer: Arc<dyn StatusObserver>) {
        self.subscribe(observer.clone());
        for child in self.children.iter_mut() {
            match child {
                TaskNode::Single(task) => task.subscribe(observer.clone()),
                TaskNode::Group(group) => group.subscribe_all(observer.clone()),
            }
        }
    }

    pub fn set_yield_hook(&mut self, hook: Option<YieldHook>) {
        for child in self.children.iter_mut() {
            child.set_yield_hook(hook.clone());
        }
        self.yield_hook = hook;
    }

    pub fn enable(&mut self) {
        debug!(group = %self.title, children = self.children.len(), "enabling group");
        for child in self.children.iter_mut() {
            child.enable();
        }
    }

    pub fn disable(&mut self) {
        debug!(group = %self.title, children = self.children.len(), "disabling group");
        for child in self.children.iter_mut() {
            child.disable();
        }
    }

    /// Run every child in insertion order, one after another.
    ///
    /// A failing child does not stop the remaining ones.
    pub fn run(&mut self) -> RunReport {
        info!(group = %self.title, children = self.children.len(), "running group");

        let mut report = RunReport::default();
        for child in self.children.iter_mut() {
            report.merge(child.run());
        }

        info!(
            group = %self.title,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            status = %self.status(),
            "group finished"
        );
        report
    }

    /// Direct child with the given title.
    pub fn get(&self, title: &str) -> Option<&TaskNode> {
        self.children.iter().find(|c| c.title() == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut TaskNode> {
        self.children.iter_mut().find(|c| c.title() == title)
    }

    /// Descendant at a `/`-separated path of titles, relative to this group.
    pub fn find(&self, path: &str) -> Option<&TaskNode> {
        let (head, rest) = split_path(path);
        let child = self.get(head)?;
        match (rest, child) {
            (None, _) => Some(child),
            (Some(rest), TaskNode::Group(group)) => group.find(rest),
            (Some(_), TaskNode::Single(_)) => None,
        }
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut TaskNode> {
        let (head, rest) = split_path(path);
        let child = self.get_mut(head)?;
        match rest {
            None => Some(child),
            Some(rest) => match child {
                TaskNode::Group(group) => group.find_mut(rest),
                TaskNode::Single(_) => None,
            },
        }
    }
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    let path = path.trim_matches('/');
    match path.split_once('/') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}
