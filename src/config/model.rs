// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// name = "release"
///
/// [default]
/// cwd = "."
///
/// [[task]]
/// title = "fmt"
/// info = "Check formatting"
/// program = "cargo"
/// args = ["fmt", "--check"]
///
/// [[task]]
/// title = "checks"
///
/// [[task.tasks]]
/// title = "clippy"
/// program = "cargo"
/// args = ["clippy"]
/// enabled = false
/// ```
///
/// This is the unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global settings from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Defaults from `[default]`.
    #[serde(default)]
    pub default: DefaultSection,

    /// Top-level entries from `[[task]]`, in file order.
    #[serde(default)]
    pub task: Vec<TaskDescription>,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so every description
/// in `task` is known to be well formed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub default: DefaultSection,
    pub task: Vec<TaskDescription>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        default: DefaultSection,
        task: Vec<TaskDescription>,
    ) -> Self {
        Self {
            config,
            default,
            task,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Title of the root group holding all top-level tasks.
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    "tasks".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

/// `[default]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultSection {
    /// Working directory for process tasks that do not set their own `cwd`.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// Description of one task or group.
///
/// - `tasks` present (even empty): a group of the nested descriptions.
/// - `program` present: a single task running that program with `args`.
/// - neither: an unconfigured placeholder task.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskDescription {
    pub title: String,

    /// Static text shown for the task (tooltip in a UI).
    #[serde(default)]
    pub info: String,

    #[serde(default)]
    pub program: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for `program`.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// `false` disables the task (every child, for a group) after building.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub tasks: Option<Vec<TaskDescription>>,
}

fn default_enabled() -> bool {
    true
}
