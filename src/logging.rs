// src/logging.rs

//! Logging setup for `tasktree` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` CLI flag, applied to every target
//! 2. `TASKTREE_LOG`, read as `EnvFilter` directives
//!    (e.g. `debug`, or `info,tasktree::tree=trace`)
//! 3. `info`
//!
//! Logs go to STDERR; stdout carries the status lines.

use anyhow::{Result, anyhow};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "TASKTREE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Initialise the global logging subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let (filter, rejected) = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    if let Some(directives) = rejected {
        warn!(%directives, "ignoring unparsable {LOG_ENV_VAR}; using '{DEFAULT_DIRECTIVES}'");
    }
    Ok(())
}

/// Pick the filter for a CLI level and the raw value of [`LOG_ENV_VAR`].
///
/// The second element holds the env value when it could not be parsed, so the
/// caller can report it once logging is up.
pub fn build_filter(
    cli_level: Option<LogLevel>,
    env_value: Option<&str>,
) -> (EnvFilter, Option<String>) {
    if let Some(level) = cli_level {
        return (EnvFilter::new(level.as_directive()), None);
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(_) => (
                EnvFilter::new(DEFAULT_DIRECTIVES),
                Some(directives.to_string()),
            ),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVES), None),
    }
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn cli_level_overrides_env() {
        let (filter, rejected) = build_filter(Some(LogLevel::Warn), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert!(rejected.is_none());
    }

    #[test]
    fn env_directives_are_honoured() {
        let (filter, _) = build_filter(None, Some("warn,tasktree::tree=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn missing_or_blank_env_defaults_to_info() {
        for value in [None, Some(""), Some("   ")] {
            let (filter, rejected) = build_filter(None, value);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
            assert!(rejected.is_none());
        }
    }

    #[test]
    fn bad_env_directives_fall_back_and_are_reported() {
        let (filter, rejected) = build_filter(None, Some("tasktree=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(rejected.as_deref(), Some("tasktree=loud"));
    }
}
