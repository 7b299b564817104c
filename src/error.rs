//! Error types for toolbox.

use std::time::Duration;

use thiserror::Error;

use crate::execution::{FAILURE, TIMEOUT};

/// Main error type for toolbox operations.
#[derive(Error, Debug)]
pub enum ToolboxError {
    /// No command (or an empty one) was handed to the runner.
    #[error("No command given to execute in call")]
    NoCommand,

    /// The command ran to completion but reported a failure code.
    #[error("command '{command}' failed with exit code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// The shell could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran longer than the configured timeout and was killed.
    #[error("command '{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// Invalid run state transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: crate::execution::RunState,
        to: crate::execution::RunState,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown text encoding name.
    #[error("unsupported encoding: {0}")]
    InvalidEncoding(String),
}

impl ToolboxError {
    /// Exit code reported alongside this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NonZeroExit { code, .. } => *code,
            Self::TimedOut { .. } => TIMEOUT,
            _ => FAILURE,
        }
    }
}

/// Convenience Result type for toolbox operations.
pub type Result<T> = std::result::Result<T, ToolboxError>;
