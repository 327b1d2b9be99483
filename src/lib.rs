// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod tree;
pub mod types;

use std::fmt::Write as _;

use anyhow::{Result, bail};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::errors::TasktreeError;
use crate::exec::RunReport;
use crate::tree::{ChannelObserver, TaskEvent, TaskGroup, TaskNode, build_tree};

pub use crate::types::{Status, TaskName};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and tree construction
/// - `--disable` / `--task` selection
/// - a blocking worker running the tree
/// - an async printer streaming status events to stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let mut root = build_tree(&cfg);

    for path in &args.disable {
        find_node_mut(&mut root, path)?.disable();
        info!(task = %path, "disabled from command line");
    }

    if let Some(ref path) = args.task {
        if root.find(path).is_none() {
            return Err(TasktreeError::TaskNotFound(path.clone()).into());
        }
    }

    if args.dry_run {
        print!("{}", render_tree(&root));
        return Ok(());
    }

    let report = execute(root, args.task).await?;

    println!(
        "{} succeeded, {} failed, {} skipped",
        report.succeeded, report.failed, report.skipped
    );

    if !report.is_success() {
        bail!("{} task(s) failed", report.failed);
    }
    Ok(())
}

/// Run the whole tree, or the node at `target`, on a blocking worker while
/// printing every status event as it arrives.
pub async fn execute(mut root: TaskGroup, target: Option<String>) -> Result<RunReport> {
    let (observer, rx) = ChannelObserver::channel();
    root.subscribe_all(observer);

    let printer = tokio::spawn(print_events(rx));

    // The tree (and with it every event sender) is dropped when the worker
    // returns, which ends the printer loop.
    let report = tokio::task::spawn_blocking(move || -> crate::errors::Result<RunReport> {
        match target {
            Some(path) => Ok(find_node_mut(&mut root, &path)?.run()),
            None => Ok(root.run()),
        }
    })
    .await??;

    printer.await?;
    debug!(?report, "tree run finished");
    Ok(report)
}

async fn print_events(mut rx: mpsc::UnboundedReceiver<TaskEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            TaskEvent::StatusChanged { task, status } => {
                println!("[{status:>8}] {task}");
            }
            TaskEvent::Failed { task, diagnostic } => {
                eprintln!("{task} failed:");
                for line in diagnostic.lines() {
                    eprintln!("    {line}");
                }
            }
        }
    }
}

fn find_node_mut<'a>(
    root: &'a mut TaskGroup,
    path: &str,
) -> crate::errors::Result<&'a mut TaskNode> {
    root.find_mut(path)
        .ok_or_else(|| TasktreeError::TaskNotFound(path.to_string()))
}

/// Dry-run rendering: one line per node with its status and payload.
pub fn render_tree(root: &TaskGroup) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", root.title(), root.status());
    render_children(root, 1, &mut out);
    out
}

fn render_children(group: &TaskGroup, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for child in group.children() {
        let status = child
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unconfigured".to_string());

        match child {
            TaskNode::Single(task) => {
                let _ = write!(out, "{indent}- {} [{status}]", task.title());
                if let Some(command) = task.command() {
                    let _ = write!(out, ": {}", command.describe());
                }
                let _ = writeln!(out);
            }
            TaskNode::Group(nested) => {
                let _ = writeln!(out, "{indent}+ {} [{status}]", nested.title());
                render_children(nested, depth + 1, out);
            }
        }
    }
}
