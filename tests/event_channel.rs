// tests/event_channel.rs

use std::error::Error;

use tasktree::tree::{ChannelObserver, Task, TaskEvent, TaskGroup};
use tasktree::{execute, render_tree, Status};
use tasktree_test_utils::init_tracing;
use tasktree_test_utils::payloads::{failing, succeeding};
use tokio::time::{timeout, Duration};

type TestResult = Result<(), Box<dyn Error>>;

fn sample_tree() -> TaskGroup {
    let mut inner = TaskGroup::new("checks", "");
    inner.add_task(Task::with_payload("lint", "", failing("lint failed")));
    inner.add_task(Task::new("todo", ""));

    let mut root = TaskGroup::new("root", "");
    root.add_task(Task::with_payload("build", "", succeeding()));
    root.add_task(inner);
    root
}

#[test]
fn channel_observer_delivers_events_in_order() {
    let (observer, mut rx) = ChannelObserver::channel();
    let mut task = Task::with_payload("A", "", failing("boom"));
    task.subscribe(observer);

    task.run();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.task() == "A"));
    assert_eq!(
        events[0],
        TaskEvent::StatusChanged { task: "A".to_string(), status: Status::Running }
    );
    assert_eq!(
        events[1],
        TaskEvent::StatusChanged { task: "A".to_string(), status: Status::Error }
    );
    match &events[2] {
        TaskEvent::Failed { task, diagnostic } => {
            assert_eq!(task, "A");
            assert!(diagnostic.contains("boom"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn dropped_receiver_does_not_break_runs() {
    let (observer, rx) = ChannelObserver::channel();
    drop(rx);

    let mut task = Task::with_payload("A", "", succeeding());
    task.subscribe(observer);
    task.run();

    assert_eq!(task.status(), Some(Status::Done));
}

#[tokio::test]
async fn execute_runs_whole_tree_on_worker() -> TestResult {
    init_tracing();

    let report = timeout(Duration::from_secs(5), execute(sample_tree(), None))
        .await
        .expect("execute did not finish within 5 seconds")?;

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    Ok(())
}

#[tokio::test]
async fn execute_runs_only_selected_subtree() -> TestResult {
    init_tracing();

    let report = execute(sample_tree(), Some("build".to_string())).await?;
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.executed(), 1);

    let missing = execute(sample_tree(), Some("checks/nope".to_string())).await;
    assert!(missing.is_err());
    Ok(())
}

#[test]
fn render_tree_shows_structure_and_status() {
    let mut root = sample_tree();
    root.find_mut("checks").unwrap().disable();

    let out = render_tree(&root);

    assert_eq!(
        out,
        "root [enabled]\n  - build [enabled]: <closure>\n  + checks [disabled]\n    - lint [disabled]: <closure>\n    - todo [unconfigured]\n"
    );
}
