// src/tree/node.rs

use std::sync::Arc;

use crate::exec::RunReport;
use crate::tree::group::TaskGroup;
use crate::tree::observer::{StatusObserver, YieldHook};
use crate::tree::task::Task;
use crate::types::Status;

/// A child of a [`TaskGroup`]: either a single task or a nested group.
#[derive(Debug)]
pub enum TaskNode {
    Single(Task),
    Group(TaskGroup),
}

impl TaskNode {
    pub fn title(&self) -> &str {
        match self {
            TaskNode::Single(task) => task.title(),
            TaskNode::Group(group) => group.title(),
        }
    }

    pub fn info(&self) -> &str {
        match self {
            TaskNode::Single(task) => task.info(),
            TaskNode::Group(group) => group.info(),
        }
    }

    /// Current status; `None` only for an unconfigured single task.
    pub fn status(&self) -> Option<Status> {
        match self {
            TaskNode::Single(task) => task.status(),
            TaskNode::Group(group) => Some(group.status()),
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            TaskNode::Single(task) => task.display_text(),
            TaskNode::Group(group) => group.display_text(),
        }
    }

    /// Subscribe to this node's own notifications.
    pub fn subscribe(&mut self, observer: Arc<dyn StatusObserver>) {
        match self {
            TaskNode::Single(task) => task.subscribe(observer),
            TaskNode::Group(group) => group.subscribe(observer),
        }
    }

    pub fn set_yield_hook(&mut self, hook: Option<YieldHook>) {
        match self {
            TaskNode::Single(task) => task.set_yield_hook(hook),
            TaskNode::Group(group) => group.set_yield_hook(hook),
        }
    }

    pub fn enable(&mut self) {
        match self {
            TaskNode::Single(task) => task.enable(),
            TaskNode::Group(group) => group.enable(),
        }
    }

    pub fn disable(&mut self) {
        match self {
            TaskNode::Single(task) => task.disable(),
            TaskNode::Group(group) => group.disable(),
        }
    }

    pub fn run(&mut self) -> RunReport {
        match self {
            TaskNode::Single(task) => task.run(),
            TaskNode::Group(group) => group.run(),
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            TaskNode::Single(task) => Some(task),
            TaskNode::Group(_) => None,
        }
    }

    pub fn as_task_mut(&mut self) -> Option<&mut Task> {
        match self {
            TaskNode::Single(task) => Some(task),
            TaskNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TaskGroup> {
        match self {
            TaskNode::Group(group) => Some(group),
            TaskNode::Single(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut TaskGroup> {
        match self {
            TaskNode::Group(group) => Some(group),
            TaskNode::Single(_) => None,
        }
    }
}

impl From<Task> for TaskNode {
    fn from(task: Task) -> Self {
        TaskNode::Single(task)
    }
}

impl From<TaskGroup> for TaskNode {
    fn from(group: TaskGroup) -> Self {
        TaskNode::Group(group)
    }
}
