// tests/config_loading.rs

use std::io::Write;

use tasktree::config::{load_and_validate, ConfigFile, TaskDescription};
use tasktree::errors::TasktreeError;
use tasktree::tree::{build_tree, TaskNode};
use tasktree::Status;
use tasktree_test_utils::builders::{ConfigFileBuilder, TaskDescriptionBuilder};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(contents: &str, needle: &str) {
    let file = write_config(contents);
    match load_and_validate(file.path()) {
        Err(TasktreeError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}");
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn loads_nested_tree_in_file_order() {
    let file = write_config(
        r#"
[config]
name = "release"

[[task]]
title = "fmt"
info = "Check formatting"
program = "cargo"
args = ["fmt", "--check"]

[[task]]
title = "checks"

[[task.tasks]]
title = "clippy"
program = "cargo"
args = ["clippy"]
enabled = false

[[task.tasks]]
title = "later"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.config.name, "release");
    assert_eq!(cfg.task.len(), 2);

    let root = build_tree(&cfg);
    assert_eq!(root.title(), "release");
    let titles: Vec<&str> = root.children().iter().map(TaskNode::title).collect();
    assert_eq!(titles, vec!["fmt", "checks"]);

    let fmt = root.find("fmt").and_then(TaskNode::as_task).unwrap();
    assert_eq!(fmt.info(), "Check formatting");
    assert_eq!(fmt.command().unwrap().describe(), "cargo fmt --check");

    assert_eq!(
        root.find("checks/clippy").and_then(TaskNode::status),
        Some(Status::Disabled)
    );
    assert_eq!(root.find("checks/later").and_then(TaskNode::status), None);
    assert_eq!(root.find("checks").and_then(TaskNode::status), Some(Status::Disabled));
    assert_eq!(root.status(), Status::Enabled);
}

#[test]
fn missing_file_is_io_error() {
    match load_and_validate("/definitely/not/here/Tasktree.toml") {
        Err(TasktreeError::IoError(_)) => {}
        other => panic!("Expected IoError, got: {other:?}"),
    }
}

#[test]
fn bad_toml_is_toml_error() {
    let file = write_config("[[task]\ntitle = ");
    match load_and_validate(file.path()) {
        Err(TasktreeError::TomlError(_)) => {}
        other => panic!("Expected TomlError, got: {other:?}"),
    }
}

#[test]
fn empty_config_is_rejected() {
    expect_config_error("[config]\nname = \"x\"\n", "at least one");
}

#[test]
fn duplicate_sibling_titles_are_rejected() {
    expect_config_error(
        r#"
[[task]]
title = "A"

[[task]]
title = "A"
"#,
        "duplicate task title 'A'",
    );
}

#[test]
fn same_title_in_different_groups_is_fine() {
    let cfg = ConfigFileBuilder::new()
        .with_task(
            TaskDescriptionBuilder::group("one")
                .child(TaskDescriptionBuilder::new("build").build())
                .build(),
        )
        .with_task(
            TaskDescriptionBuilder::group("two")
                .child(TaskDescriptionBuilder::new("build").build())
                .build(),
        )
        .build();

    let root = build_tree(&cfg);
    assert!(root.find("one/build").is_some());
    assert!(root.find("two/build").is_some());
}

#[test]
fn program_and_tasks_together_are_rejected() {
    expect_config_error(
        r#"
[[task]]
title = "both"
program = "true"
tasks = []
"#,
        "both `program` and `tasks`",
    );
}

#[test]
fn args_without_program_are_rejected() {
    expect_config_error(
        r#"
[[task]]
title = "A"
args = ["x"]
"#,
        "`args` but no `program`",
    );
}

#[test]
fn slash_in_title_is_rejected() {
    expect_config_error(
        r#"
[[task]]
title = "a/b"
"#,
        "must not contain '/'",
    );
}

#[test]
fn nested_errors_are_found() {
    let raw = ConfigFileBuilder::new()
        .with_task(
            TaskDescriptionBuilder::group("outer")
                .child(TaskDescriptionBuilder::new("  ").build())
                .build(),
        )
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(TasktreeError::ConfigError(msg)) => assert!(msg.contains("must not be empty")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn default_cwd_applies_to_process_tasks() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker"), "x").unwrap();

    let cfg = ConfigFileBuilder::new()
        .with_default_cwd(dir.path().to_str().unwrap())
        .with_task(
            TaskDescriptionBuilder::new("inherits")
                .program("test")
                .arg("-f")
                .arg("marker")
                .build(),
        )
        .with_task(
            TaskDescriptionBuilder::new("overrides")
                .program("test")
                .arg("-f")
                .arg("marker")
                .cwd("/")
                .build(),
        )
        .build();

    let mut root = build_tree(&cfg);
    root.run();

    assert_eq!(root.find("inherits").and_then(TaskNode::status), Some(Status::Done));
    assert_eq!(root.find("overrides").and_then(TaskNode::status), Some(Status::Error));
}

#[test]
fn add_description_builds_and_validates() {
    let mut root = tasktree::tree::TaskGroup::new("root", "");

    let desc: TaskDescription = TaskDescriptionBuilder::group("g")
        .child(TaskDescriptionBuilder::new("x").program("true").build())
        .enabled(false)
        .build();
    let node = root.add_description(&desc).unwrap();
    assert_eq!(node.status(), Some(Status::Disabled));

    let bad = TaskDescriptionBuilder::new("").build();
    assert!(matches!(
        root.add_description(&bad),
        Err(TasktreeError::ConfigError(_))
    ));
    assert_eq!(root.len(), 1);
}
