// src/tree/mod.rs

//! Task tree: single tasks, groups, and status propagation.
//!
//! - [`task`] wraps one [`Command`](crate::exec::Command) with a title and
//!   display text.
//! - [`group`] holds ordered children and rolls their statuses up.
//! - [`node`] is the child type of a group (task or nested group).
//! - [`observer`] carries status-changed and error notifications.
//! - [`build`] turns config descriptions into nodes.
//!
//! Everything runs synchronously on the caller's thread: `run()` on a group
//! runs its children one after another and returns when the last finishes.

pub mod build;
pub mod group;
pub mod node;
pub mod observer;
pub mod task;

pub use build::build_tree;
pub use group::TaskGroup;
pub use node::TaskNode;
pub use observer::{ChannelObserver, Observers, StatusObserver, TaskEvent, YieldHook};
pub use task::Task;
