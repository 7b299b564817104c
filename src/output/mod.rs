//! Output processing and sanitization.
//!
//! This module turns raw process output into lines:
//! - Decoding with a configurable [`Encoding`]
//! - Optional ANSI escape code stripping
//! - Splitting on `\r\n`, `\r` and `\n`
//!
//! # Example
//!
//! ```
//! use toolbox::output::{sanitize, LineSanitizer};
//!
//! let lines = sanitize(Some("test1\r\ntest2\r\ntest3\n"));
//! assert_eq!(lines, vec!["test1", "test2", "test3"]);
//!
//! let clean = LineSanitizer::new()
//!     .with_strip_ansi(true)
//!     .sanitize(b"\x1b[31mRed text\x1b[0m");
//! assert_eq!(clean, vec!["Red text"]);
//! ```

mod encoding;
mod sanitizer;
mod sink;

pub use encoding::Encoding;
pub use sanitizer::{sanitize, strip_ansi, strip_ansi_str, LineSanitizer};
pub use sink::{null_sink, stderr_sink, stdout_sink, LineSink};
