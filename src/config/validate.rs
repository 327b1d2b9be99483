// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile, TaskDescription};
use crate::errors::{Result, TasktreeError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TasktreeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.default, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_siblings(&cfg.task, &cfg.config.name)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TasktreeError::ConfigError(
            "config must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    validate_title(&cfg.config.name)
        .map_err(|msg| TasktreeError::ConfigError(format!("[config].name {msg}")))
}

/// Validate a single description and everything nested below it.
pub fn validate_description(desc: &TaskDescription) -> Result<()> {
    validate_title(&desc.title)
        .map_err(|msg| TasktreeError::ConfigError(format!("task title {msg}")))?;

    match (&desc.program, &desc.tasks) {
        (Some(_), Some(_)) => {
            return Err(TasktreeError::ConfigError(format!(
                "task '{}' cannot have both `program` and `tasks`",
                desc.title
            )));
        }
        (None, _) if !desc.args.is_empty() => {
            return Err(TasktreeError::ConfigError(format!(
                "task '{}' has `args` but no `program`",
                desc.title
            )));
        }
        (None, _) if desc.cwd.is_some() => {
            return Err(TasktreeError::ConfigError(format!(
                "task '{}' has `cwd` but no `program`",
                desc.title
            )));
        }
        _ => {}
    }

    if let Some(ref children) = desc.tasks {
        validate_siblings(children, &desc.title)?;
    }

    Ok(())
}

fn validate_siblings(children: &[TaskDescription], parent: &str) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for child in children {
        validate_description(child)?;
        if !seen.insert(child.title.as_str()) {
            return Err(TasktreeError::ConfigError(format!(
                "duplicate task title '{}' in '{}'",
                child.title, parent
            )));
        }
    }
    Ok(())
}

fn validate_title(title: &str) -> std::result::Result<(), String> {
    if title.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if title.contains('/') {
        return Err(format!("'{title}' must not contain '/'"));
    }
    Ok(())
}
