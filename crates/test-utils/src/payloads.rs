//! Ready-made payloads for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

/// Payload that always succeeds.
pub fn succeeding() -> impl FnMut() -> Result<()> + Send + 'static {
    || -> Result<()> { Ok(()) }
}

/// Payload that always fails with `message`.
pub fn failing(message: &str) -> impl FnMut() -> Result<()> + Send + 'static {
    let message = message.to_string();
    move || -> Result<()> { Err(anyhow!("{message}")) }
}

/// Payload that panics with `message`.
pub fn panicking(message: &str) -> impl FnMut() -> Result<()> + Send + 'static {
    let message = message.to_string();
    move || -> Result<()> { panic!("{message}") }
}

/// Payload that succeeds and bumps `counter` on every invocation.
pub fn counting(counter: Arc<AtomicUsize>) -> impl FnMut() -> Result<()> + Send + 'static {
    move || -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Payload whose result is taken from `script` in order; the last entry
/// repeats once the list is exhausted.
pub fn scripted(script: Vec<std::result::Result<(), String>>) -> impl FnMut() -> Result<()> + Send + 'static {
    let mut calls = 0usize;
    move || -> Result<()> {
        let idx = calls.min(script.len().saturating_sub(1));
        calls += 1;
        match script.get(idx) {
            Some(Err(msg)) => Err(anyhow!("{msg}")),
            _ => Ok(()),
        }
    }
}
