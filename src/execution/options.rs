//! Options controlling how a command is executed.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::output::{stderr_sink, stdout_sink, Encoding, LineSanitizer, LineSink};
use crate::platform::Platform;

/// Configuration for a [`CommandRunner`](super::CommandRunner).
#[derive(Clone)]
pub struct ExecutionOptions {
    /// Stream output without blocking (`true`) or block until exit.
    pub asynchronous: bool,
    /// Forward captured lines to the sinks.
    pub verbose: bool,
    /// Receives stdout lines (and sync failure messages).
    pub log: LineSink,
    /// Receives stderr lines.
    pub error_log: LineSink,
    /// Command interpreter.
    pub shell: String,
    /// Arguments placed before the command text.
    pub shell_args: Vec<String>,
    /// Kill the child after this long.
    pub timeout: Option<Duration>,
    /// Working directory override.
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables.
    pub env: HashMap<String, String>,
    /// Encoding of the child's output.
    pub encoding: Encoding,
    /// Remove ANSI escape sequences from forwarded lines.
    pub strip_ansi: bool,
}

impl ExecutionOptions {
    /// Defaults for the given platform.
    pub fn for_platform(platform: &Platform) -> Self {
        Self {
            asynchronous: true,
            verbose: true,
            log: stdout_sink(),
            error_log: stderr_sink(),
            shell: platform.default_shell(),
            shell_args: platform.default_shell_args(),
            timeout: None,
            working_dir: None,
            env: HashMap::new(),
            encoding: Encoding::default(),
            strip_ansi: false,
        }
    }

    /// Set whether `call` streams (`true`) or blocks.
    pub fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    /// Set whether output lines are forwarded.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the stdout line sink.
    pub fn log<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Arc::new(sink);
        self
    }

    /// Set the stderr line sink.
    pub fn error_log<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.error_log = Arc::new(sink);
        self
    }

    /// Set the command interpreter.
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Set the arguments placed before the command text.
    pub fn shell_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shell_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the execution timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the output encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether ANSI escapes are stripped.
    pub fn strip_ansi(mut self, strip: bool) -> Self {
        self.strip_ansi = strip;
        self
    }

    /// Sanitizer matching these options.
    pub fn sanitizer(&self) -> LineSanitizer {
        LineSanitizer::new()
            .with_encoding(self.encoding)
            .with_strip_ansi(self.strip_ansi)
    }
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self::for_platform(&Platform::detect())
    }
}

impl fmt::Debug for ExecutionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionOptions")
            .field("asynchronous", &self.asynchronous)
            .field("verbose", &self.verbose)
            .field("shell", &self.shell)
            .field("shell_args", &self.shell_args)
            .field("timeout", &self.timeout)
            .field("working_dir", &self.working_dir)
            .field("env", &self.env)
            .field("encoding", &self.encoding)
            .field("strip_ansi", &self.strip_ansi)
            .finish_non_exhaustive()
    }
}
