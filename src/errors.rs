// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TasktreeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure raised while a command invoked its payload.
///
/// This never escapes [`crate::exec::Command::run`]; it is turned into the
/// `Error` status plus a diagnostic string.
#[derive(Error, Debug)]
pub enum PayloadFailure {
    /// The payload returned an error. `Debug` formatting of the inner error
    /// carries the whole `Caused by:` chain.
    #[error("{0:?}")]
    Failed(anyhow::Error),

    /// The payload panicked.
    #[error("payload panicked: {0}")]
    Panicked(String),
}

impl PayloadFailure {
    /// Human-readable diagnostic recorded as the command's last error.
    ///
    /// Never empty: an error without any text still leaves a message behind.
    pub fn diagnostic(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            return "payload failed without a message".to_string();
        }
        text
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TasktreeError>;
