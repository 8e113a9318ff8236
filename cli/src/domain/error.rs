//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Command errors ────────────────────────────────────────────────────────────

/// Failure of an external command run through the `CommandRunner` port.
///
/// The runner logs the failing command (and its captured stderr) when it
/// produces one of these, so callers escalating it must not log it again.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command `{command}` failed ({status})")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` timed out after {secs}s")]
    TimedOut { command: String, secs: u64 },
}

impl CommandError {
    /// The command line that failed.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Failed { command, .. }
            | Self::Spawn { command, .. }
            | Self::TimedOut { command, .. } => command,
        }
    }
}

// ── Stack errors ──────────────────────────────────────────────────────────────

/// Errors raised by the stack-up workflow itself.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("Infrastructure apply failed in background: {reason}")]
    BackgroundApplyFailed { reason: String },

    #[error("Project root not found: {0}")]
    RootNotFound(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

/// Returns `true` when `err` has already been shown to the operator by the
/// layer that produced it (the command runner or the readiness poller).
#[must_use]
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CommandError>().is_some()
        || matches!(
            err.downcast_ref::<StackError>(),
            Some(StackError::BackgroundApplyFailed { .. })
        )
}
