//! Command execution engine.

use std::io::Read;
use std::process::{ExitStatus, Output, Stdio};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace, warn};

use super::command::CommandSpec;
use super::options::ExecutionOptions;
use super::result::{ExecutionResult, OutputSource, FAILURE, SUCCESS};
use super::state::RunState;
use crate::error::ToolboxError;
use crate::output::{LineSanitizer, LineSink};

/// Buffer size for reading child output.
const READ_BUFFER_SIZE: usize = 4096;

/// Poll interval for the blocking timeout loop.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Callback that ignores its arguments. Use it when a call site needs a
/// callback but has nothing to do with the outcome.
pub fn nil(_err: Option<&ToolboxError>, _code: i32) {}

/// Runs shell commands with a fixed set of options.
///
/// Each invocation spawns its own child process; a runner can be cloned
/// and used from several tasks at once.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    options: ExecutionOptions,
}

impl CommandRunner {
    /// Create a runner with the given options.
    pub fn new(options: ExecutionOptions) -> Self {
        Self { options }
    }

    /// Options used by this runner.
    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Run a command, streaming its output line by line.
    ///
    /// An absent or empty command terminates immediately with code 127 and
    /// nothing is spawned. A timeout applies to the child's exit; output
    /// still open when it expires is detached.
    pub async fn run(&self, cmd: impl Into<CommandSpec>) -> ExecutionResult {
        let start = Instant::now();
        let mut state = RunState::default();

        let command_line = cmd.into().normalize();
        if command_line.is_empty() {
            advance(&mut state, RunState::Terminated(FAILURE));
            return ExecutionResult::failure(ToolboxError::NoCommand, start.elapsed());
        }

        let mut child = match self.async_command(&command_line).spawn() {
            Ok(child) => child,
            Err(source) => {
                warn!("failed to spawn '{}': {}", command_line, source);
                advance(&mut state, RunState::Terminated(FAILURE));
                return ExecutionResult::failure(
                    ToolboxError::Spawn {
                        command: command_line,
                        source,
                    },
                    start.elapsed(),
                );
            }
        };
        advance(&mut state, RunState::Spawned);
        debug!(pid = ?child.id(), shell = %self.options.shell, "spawned '{}'", command_line);

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let sanitizer = self.options.sanitizer();
        let (log, error_log) = self.sinks();
        advance(&mut state, RunState::Streaming);

        let deadline = self
            .options
            .timeout
            .map(|limit| tokio::time::Instant::now() + limit);
        let mut streams = std::pin::pin!(async {
            tokio::join!(
                drain(stdout, sanitizer, log, OutputSource::Stdout),
                drain(stderr, sanitizer, error_log, OutputSource::Stderr),
            );
        });
        let mut drained = false;

        // The deadline bounds the child itself; output keeps flowing meanwhile.
        let exited = async {
            loop {
                tokio::select! {
                    _ = &mut streams, if !drained => drained = true,
                    status = child.wait() => break status,
                }
            }
        };
        let waited = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, exited).await.ok(),
            None => Some(exited.await),
        };

        // A background process may still hold the pipes after the shell exits.
        if !drained && matches!(waited, Some(Ok(_))) {
            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, &mut streams).await.is_err() {
                        debug!("output of '{}' still open at deadline, detaching", command_line);
                    }
                }
                None => (&mut streams).await,
            }
        }

        let status = match waited {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                advance(&mut state, RunState::Terminated(FAILURE));
                return ExecutionResult::failure(ToolboxError::Io(e), start.elapsed());
            }
            None => {
                if let Err(e) = child.kill().await {
                    warn!("failed to kill timed out child: {}", e);
                }
                let timeout = self.options.timeout.unwrap_or_default();
                let err = ToolboxError::TimedOut {
                    command: command_line,
                    timeout,
                };
                advance(&mut state, RunState::Terminated(err.exit_code()));
                return ExecutionResult::failure(err, start.elapsed());
            }
        };

        let code = exit_code(&status);
        advance(&mut state, RunState::Terminated(code));
        finish(command_line, code, start.elapsed())
    }

    /// Run a command and report the outcome to `callback` exactly once.
    ///
    /// When the runner is not asynchronous the command runs on the
    /// blocking path instead.
    pub async fn call<F>(&self, cmd: impl Into<CommandSpec>, callback: F)
    where
        F: FnOnce(Option<&ToolboxError>, i32),
    {
        let result = if self.options.asynchronous {
            self.run(cmd).await
        } else {
            let runner = self.clone();
            let spec = cmd.into();
            let start = Instant::now();
            tokio::task::spawn_blocking(move || runner.run_sync_result(spec))
                .await
                .unwrap_or_else(|e| {
                    ExecutionResult::failure(
                        ToolboxError::Io(std::io::Error::other(e.to_string())),
                        start.elapsed(),
                    )
                })
        };
        callback(result.error.as_ref(), result.code);
    }

    /// Run a command, blocking until it exits.
    ///
    /// Returns 0 on success and 127 on any failure. The failure message is
    /// forwarded to the log sink when verbose.
    pub fn run_sync(&self, cmd: impl Into<CommandSpec>) -> i32 {
        let result = self.run_sync_result(cmd);
        match &result.error {
            None => SUCCESS,
            Some(err) => {
                if self.options.verbose {
                    (self.options.log)(&err.to_string());
                }
                FAILURE
            }
        }
    }

    /// Blocking run that keeps the real exit code and error.
    ///
    /// Output is captured and forwarded to the sinks once the child has
    /// exited. With a timeout, output still open at the deadline is cut off
    /// and the child's own exit code is kept.
    pub fn run_sync_result(&self, cmd: impl Into<CommandSpec>) -> ExecutionResult {
        let start = Instant::now();
        let mut state = RunState::default();

        let command_line = cmd.into().normalize();
        if command_line.is_empty() {
            advance(&mut state, RunState::Terminated(FAILURE));
            return ExecutionResult::failure(ToolboxError::NoCommand, start.elapsed());
        }

        let command = self.sync_command(&command_line);
        let output = match self.options.timeout {
            Some(limit) => wait_with_timeout(command, &command_line, limit),
            None => output_of(command, &command_line),
        };

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                warn!("'{}' failed: {}", command_line, err);
                advance(&mut state, RunState::Terminated(err.exit_code()));
                return ExecutionResult::failure(err, start.elapsed());
            }
        };
        advance(&mut state, RunState::Spawned);

        let sanitizer = self.options.sanitizer();
        let (log, error_log) = self.sinks();
        forward(&sanitizer, &output.stdout, log);
        forward(&sanitizer, &output.stderr, error_log);

        let code = exit_code(&output.status);
        advance(&mut state, RunState::Terminated(code));
        finish(command_line, code, start.elapsed())
    }

    fn sinks(&self) -> (Option<&LineSink>, Option<&LineSink>) {
        if self.options.verbose {
            (Some(&self.options.log), Some(&self.options.error_log))
        } else {
            (None, None)
        }
    }

    fn async_command(&self, command_line: &str) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.options.shell);
        command
            .args(&self.options.shell_args)
            .arg(command_line)
            .envs(&self.options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.options.working_dir {
            command.current_dir(dir);
        }
        command
    }

    fn sync_command(&self, command_line: &str) -> std::process::Command {
        let mut command = std::process::Command::new(&self.options.shell);
        command
            .args(&self.options.shell_args)
            .arg(command_line)
            .envs(&self.options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.options.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

fn advance(state: &mut RunState, to: RunState) {
    let from = *state;
    match state.transition_to(to) {
        Ok(()) => trace!(?from, ?to, "run state"),
        Err(e) => warn!("{}", e),
    }
}

fn finish(command: String, code: i32, duration: Duration) -> ExecutionResult {
    if code == SUCCESS {
        debug!("'{}' exited with 0", command);
        ExecutionResult::success(duration)
    } else {
        debug!("'{}' exited with {}", command, code);
        ExecutionResult::failure(ToolboxError::NonZeroExit { command, code }, duration)
    }
}

/// Read a child stream to EOF, forwarding each chunk's lines to `sink`.
async fn drain<R>(
    reader: Option<R>,
    sanitizer: LineSanitizer,
    sink: Option<&LineSink>,
    source: OutputSource,
) where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return;
    };
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                trace!(?source, bytes = n, "output chunk");
                forward(&sanitizer, &buf[..n], sink);
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(?source, "error reading child output: {}", e);
                break;
            }
        }
    }
}

fn forward(sanitizer: &LineSanitizer, data: &[u8], sink: Option<&LineSink>) {
    if let Some(sink) = sink {
        sanitizer.sanitize_to(data, sink);
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    FAILURE
}

fn output_of(mut command: std::process::Command, command_line: &str) -> crate::Result<Output> {
    command.output().map_err(|source| ToolboxError::Spawn {
        command: command_line.to_string(),
        source,
    })
}

/// Blocking wait with a deadline. Pipes are drained on helper threads so a
/// chatty child cannot stall on a full pipe while we poll.
fn wait_with_timeout(
    mut command: std::process::Command,
    command_line: &str,
    limit: Duration,
) -> crate::Result<Output> {
    let start = Instant::now();
    let mut child = command.spawn().map_err(|source| ToolboxError::Spawn {
        command: command_line.to_string(),
        source,
    })?;

    let deadline = start + limit;
    let stdout = child.stdout.take().map(read_to_end_thread);
    let stderr = child.stderr.take().map(read_to_end_thread);

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() > deadline {
            if let Err(e) = child.kill() {
                warn!("failed to kill child process {}: {}", child.id(), e);
            }
            child.wait().ok();
            return Err(ToolboxError::TimedOut {
                command: command_line.to_string(),
                timeout: limit,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect_reader(stdout, deadline, command_line),
        stderr: collect_reader(stderr, deadline, command_line),
    })
}

/// Output gathered by a reader thread, plus a signal sent once it hits EOF.
struct PipeReader {
    data: Arc<Mutex<Vec<u8>>>,
    done: mpsc::Receiver<()>,
}

fn read_to_end_thread<R: Read + Send + 'static>(mut reader: R) -> PipeReader {
    let data = Arc::new(Mutex::new(Vec::new()));
    let (tx, done) = mpsc::channel();
    let sink = Arc::clone(&data);

    thread::spawn(move || {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if let Ok(mut data) = sink.lock() {
                        data.extend_from_slice(&buf[..n]);
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("error reading child output: {}", e);
                    break;
                }
            }
        }
        tx.send(()).ok();
    });

    PipeReader { data, done }
}

/// Take what a reader has gathered, waiting for EOF no later than `deadline`.
///
/// A reader still blocked at the deadline is left detached; it exits on its
/// own once the last writer closes the pipe.
fn collect_reader(reader: Option<PipeReader>, deadline: Instant, command_line: &str) -> Vec<u8> {
    let Some(reader) = reader else {
        return Vec::new();
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    if reader.done.recv_timeout(remaining).is_err() {
        debug!("output of '{}' still open at deadline, detaching", command_line);
    }
    let data = reader
        .data
        .lock()
        .map(|mut data| std::mem::take(&mut *data))
        .unwrap_or_default();
    data
}

/// Run a command with default options and report to `callback`.
pub async fn call<F>(cmd: impl Into<CommandSpec>, callback: F)
where
    F: FnOnce(Option<&ToolboxError>, i32),
{
    CommandRunner::default().call(cmd, callback).await;
}

/// Blocking run with default options; 0 on success, 127 on failure.
pub fn call_sync(cmd: impl Into<CommandSpec>) -> i32 {
    CommandRunner::default().run_sync(cmd)
}

/// Simple one-shot blocking execution that keeps the exit code.
pub fn execute_simple(cmd: impl Into<CommandSpec>) -> ExecutionResult {
    CommandRunner::default().run_sync_result(cmd)
}

/// Blocking execution with a timeout.
pub fn execute_with_timeout(cmd: impl Into<CommandSpec>, timeout: Duration) -> ExecutionResult {
    CommandRunner::new(ExecutionOptions::default().timeout(timeout)).run_sync_result(cmd)
}
