#![allow(dead_code)]

use tasktree::config::{ConfigFile, ConfigSection, DefaultSection, RawConfigFile, TaskDescription};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                default: DefaultSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.config.config.name = name.to_string();
        self
    }

    pub fn with_default_cwd(mut self, cwd: &str) -> Self {
        self.config.default.cwd = Some(cwd.into());
        self
    }

    pub fn with_task(mut self, task: TaskDescription) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskDescription`.
pub struct TaskDescriptionBuilder {
    task: TaskDescription,
}

impl TaskDescriptionBuilder {
    /// A placeholder description with only a title.
    pub fn new(title: &str) -> Self {
        Self {
            task: TaskDescription {
                title: title.to_string(),
                info: String::new(),
                program: None,
                args: vec![],
                cwd: None,
                enabled: true,
                tasks: None,
            },
        }
    }

    /// A group description with no children yet.
    pub fn group(title: &str) -> Self {
        let mut builder = Self::new(title);
        builder.task.tasks = Some(vec![]);
        builder
    }

    pub fn info(mut self, info: &str) -> Self {
        self.task.info = info.to_string();
        self
    }

    pub fn program(mut self, program: &str) -> Self {
        self.task.program = Some(program.to_string());
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.task.args.push(arg.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.task.cwd = Some(cwd.into());
        self
    }

    pub fn enabled(mut self, val: bool) -> Self {
        self.task.enabled = val;
        self
    }

    pub fn child(mut self, child: TaskDescription) -> Self {
        self.task.tasks.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn build(self) -> TaskDescription {
        self.task
    }
}
