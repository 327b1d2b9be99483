// src/exec/payload.rs

//! The runnable capability a [`Command`](super::Command) invokes.

use anyhow::Result;

/// A unit of work with a single `invoke` operation.
///
/// Any `FnMut() -> anyhow::Result<()>` closure is a `Runnable`; process
/// invocations use [`ProcessPayload`](super::ProcessPayload).
pub trait Runnable: Send {
    /// Run the payload to completion on the calling thread.
    fn invoke(&mut self) -> Result<()>;

    /// Short description for dry-run output and logs.
    fn describe(&self) -> String {
        "<closure>".to_string()
    }
}

impl<F> Runnable for F
where
    F: FnMut() -> Result<()> + Send,
{
    fn invoke(&mut self) -> Result<()> {
        self()
    }
}
