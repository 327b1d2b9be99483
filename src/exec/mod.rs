// src/exec/mod.rs

//! Execution layer.
//!
//! - [`payload`] defines the [`Runnable`] capability a command invokes.
//! - [`process`] provides [`ProcessPayload`], a program plus argument vector
//!   run to completion with `std::process::Command`.
//! - [`command`] owns the per-command state machine: status transitions,
//!   failure containment and notifications.

pub mod command;
pub mod payload;
pub mod process;

pub use command::{Command, RunOutcome, RunReport};
pub use payload::Runnable;
pub use process::ProcessPayload;
