//! Command execution engine.
//!
//! This module runs shell commands:
//! - Asynchronous execution with line-by-line output streaming
//! - Blocking execution that captures output in full
//! - Optional timeout
//!
//! # Example
//!
//! ```no_run
//! use toolbox::execution::{CommandRunner, ExecutionOptions};
//!
//! # async fn demo() {
//! let runner = CommandRunner::new(ExecutionOptions::default().verbose(false));
//!
//! let result = runner.run("ls -axpl").await;
//! assert_eq!(result.code, 0);
//!
//! // Callback style, reporting exactly once
//! runner
//!     .call(vec!["ls", "-axpl"], |err, code| {
//!         if let Some(err) = err {
//!             eprintln!("{} ({})", err, code);
//!         }
//!     })
//!     .await;
//!
//! // Blocking: 0 on success, 127 on failure
//! let rc = runner.run_sync("sleep 1");
//! # let _ = rc;
//! # }
//! ```

mod command;
mod executor;
mod options;
mod result;
mod state;

pub use command::CommandSpec;
pub use executor::{
    call, call_sync, execute_simple, execute_with_timeout, nil, CommandRunner,
};
pub use options::ExecutionOptions;
pub use result::{ExecutionResult, OutputSource, FAILURE, SUCCESS, TIMEOUT};
pub use state::RunState;
