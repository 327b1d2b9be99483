// tests/scenarios.rs

//! End-to-end behaviour of single tasks and groups driven the way a UI
//! layer would drive them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tasktree::tree::{Task, TaskGroup};
use tasktree::Status;
use tasktree_test_utils::init_tracing;
use tasktree_test_utils::payloads::{counting, failing, succeeding};
use tasktree_test_utils::recorder::RecordingObserver;

#[test]
fn successful_task_goes_enabled_running_done() {
    init_tracing();

    let mut task = Task::new("Working Task", "Task Tooltip");
    let recorder = RecordingObserver::new();
    task.subscribe(recorder.clone());
    task.configure(succeeding());

    task.run();

    assert_eq!(
        recorder.statuses_of("Working Task"),
        vec![Status::Enabled, Status::Running, Status::Done]
    );
    assert_eq!(task.display_text(), "Task Tooltip");
}

#[test]
fn failing_task_goes_enabled_running_error() {
    init_tracing();

    let mut task = Task::new("Error Task", "Task Tooltip");
    let recorder = RecordingObserver::new();
    task.subscribe(recorder.clone());
    task.configure(failing("Exception"));

    task.run();

    assert_eq!(
        recorder.statuses_of("Error Task"),
        vec![Status::Enabled, Status::Running, Status::Error]
    );
    let err = task.last_error().expect("last error set");
    assert!(!err.is_empty());
    assert!(task.display_text().contains(err));
}

#[test]
fn group_with_one_success_and_one_failure_ends_in_error() {
    init_tracing();

    let ok_calls = Arc::new(AtomicUsize::new(0));
    let mut group = TaskGroup::new("Group Task", "");
    group.add_task(Task::with_payload("ok", "", counting(ok_calls.clone())));
    group.add_task(Task::with_payload("bad", "", failing("nope")));

    let report = group.run();

    assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.executed(), 2);
    assert_eq!(report.failed, 1);
    assert_eq!(group.get("ok").and_then(|n| n.status()), Some(Status::Done));
    assert_eq!(group.get("bad").and_then(|n| n.status()), Some(Status::Error));
    assert_eq!(group.status(), Status::Error);
}

#[test]
fn disabled_task_in_group_is_not_executed() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let mut group = TaskGroup::new("Group Task", "");
    group
        .add_task(Task::with_payload("off", "", counting(calls.clone())))
        .disable();

    let recorder = RecordingObserver::new();
    group.subscribe_all(recorder.clone());

    let report = group.run();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.skipped, 1);
    assert!(recorder.statuses_of("off").is_empty());
    assert!(recorder.statuses_of("Group Task").is_empty());
    assert_eq!(group.status(), Status::Disabled);
}

#[test]
fn disabled_task_does_not_mask_siblings() {
    let mut group = TaskGroup::new("Group Task", "");
    group
        .add_task(Task::with_payload("off", "", succeeding()))
        .disable();
    group.add_task(Task::with_payload("on", "", succeeding()));

    group.run();

    assert_eq!(group.get("off").and_then(|n| n.status()), Some(Status::Disabled));
    assert_eq!(group.status(), Status::Done);
}
