// src/tree/build.rs

//! Construction of task trees from descriptions.

use tracing::debug;

use crate::config::model::{ConfigFile, DefaultSection, TaskDescription};
use crate::config::validate::validate_description;
use crate::errors::Result;
use crate::exec::ProcessPayload;
use crate::tree::group::TaskGroup;
use crate::tree::node::TaskNode;
use crate::tree::task::Task;

impl TaskNode {
    /// Validate `desc` and build the task or group it describes.
    pub fn from_description(desc: &TaskDescription) -> Result<Self> {
        validate_description(desc)?;
        Ok(build_node(desc, &DefaultSection::default()))
    }
}

/// Build the root group for a validated config.
///
/// Top-level entries become the root's children, in file order.
pub fn build_tree(cfg: &ConfigFile) -> TaskGroup {
    let mut root = TaskGroup::new(cfg.config.name.clone(), String::new());
    for desc in cfg.task.iter() {
        root.add_task(build_node(desc, &cfg.default));
    }
    debug!(root = %root.title(), children = root.len(), "task tree built");
    root
}

fn build_node(desc: &TaskDescription, defaults: &DefaultSection) -> TaskNode {
    let mut node = match (&desc.tasks, &desc.program) {
        (Some(children), _) => {
            let mut group = TaskGroup::new(desc.title.clone(), desc.info.clone());
            for child in children {
                group.add_task(build_node(child, defaults));
            }
            TaskNode::Group(group)
        }
        (None, Some(program)) => {
            let mut payload = ProcessPayload::new(program.clone(), desc.args.iter().cloned());
            if let Some(cwd) = desc.cwd.as_ref().or(defaults.cwd.as_ref()) {
                payload = payload.with_cwd(cwd.clone());
            }
            TaskNode::Single(Task::with_payload(
                desc.title.clone(),
                desc.info.clone(),
                payload,
            ))
        }
        (None, None) => TaskNode::Single(Task::new(desc.title.clone(), desc.info.clone())),
    };

    if !desc.enabled {
        node.disable();
    }
    node
}
