//! Execution result types.

use std::time::Duration;

use crate::error::ToolboxError;

/// Exit code of a successful command.
pub const SUCCESS: i32 = 0;

/// Exit code for "could not start" and for any failure reported by the
/// blocking runner.
pub const FAILURE: i32 = 127;

/// Exit code reported when a command is killed after its timeout.
pub const TIMEOUT: i32 = 124;

/// Outcome of one command invocation.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Exit code; 0 on success.
    pub code: i32,
    /// Failure description, present whenever `code` is not 0.
    pub error: Option<ToolboxError>,
    /// Wall-clock time from entry to termination.
    pub duration: Duration,
}

impl ExecutionResult {
    /// A successful result.
    pub fn success(duration: Duration) -> Self {
        Self {
            code: SUCCESS,
            error: None,
            duration,
        }
    }

    /// A failed result; the code comes from the error.
    pub fn failure(error: ToolboxError, duration: Duration) -> Self {
        Self {
            code: error.exit_code(),
            error: Some(error),
            duration,
        }
    }

    /// Check if the command succeeded.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS && self.error.is_none()
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Convert into a plain `Result`, discarding the duration.
    pub fn into_result(self) -> crate::Result<i32> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.code),
        }
    }
}

/// Which standard stream a chunk of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}
