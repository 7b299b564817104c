//! Line sinks: where sanitized output lines are delivered.

use std::io::Write;
use std::sync::Arc;

/// A function that receives one line of output at a time.
pub type LineSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Sink that prints each line to standard output.
pub fn stdout_sink() -> LineSink {
    Arc::new(|line: &str| {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", line);
    })
}

/// Sink that prints each line to standard error.
pub fn stderr_sink() -> LineSink {
    Arc::new(|line: &str| {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}", line);
    })
}

/// Sink that discards everything.
pub fn null_sink() -> LineSink {
    Arc::new(|_: &str| {})
}
