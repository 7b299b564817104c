//! # toolbox
//!
//! A small utility toolbox built around a shell command runner.
//!
//! ## Features
//!
//! - **Command runner**: run a command in the platform shell, streaming
//!   stdout and stderr line by line, or block until it exits
//! - **Output sanitizer**: decode process output and split it into clean lines
//! - **Helpers**: v4 UUIDs, random integers, closest-number search,
//!   directory listing, map value lookup and platform flags
//!
//! ## Quick Start
//!
//! ```no_run
//! use toolbox::{CommandRunner, ExecutionOptions, Platform};
//!
//! #[tokio::main]
//! async fn main() {
//!     toolbox::logging::try_init().ok();
//!
//!     let platform = Platform::detect();
//!     let runner = CommandRunner::new(ExecutionOptions::for_platform(&platform));
//!
//!     runner
//!         .call("env", |err, code| match err {
//!             Some(err) => eprintln!("{} ({})", err, code),
//!             None => println!("done"),
//!         })
//!         .await;
//!
//!     println!("{}", toolbox::random::get_uuid(false));
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod fs;
pub mod logging;
pub mod output;
pub mod platform;
pub mod random;
pub mod search;

// Re-export commonly used types
pub use error::{Result, ToolboxError};
pub use execution::{
    call, call_sync, nil, CommandRunner, CommandSpec, ExecutionOptions, ExecutionResult,
};
pub use fs::get_directories;
pub use output::{sanitize, Encoding, LineSanitizer, LineSink};
pub use platform::Platform;
pub use random::{get_random_int, get_random_int_inclusive, get_uuid};
pub use search::{closest_number, find_key_by_value, has_value, round_up};
