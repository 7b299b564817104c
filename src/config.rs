//! Configuration management for toolbox.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::ExecutionOptions;
use crate::logging;
use crate::output::Encoding;
use crate::platform::Platform;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command execution settings.
    pub execution: ExecutionSection,
    /// Output decoding settings.
    pub output: OutputSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Command execution section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSection {
    /// Shell path; the platform default when unset.
    pub shell: Option<String>,
    /// Shell arguments; the platform default when unset.
    pub shell_args: Option<Vec<String>>,
    /// Forward command output lines.
    pub verbose: bool,
    /// Stream output instead of blocking.
    pub asynchronous: bool,
    /// Timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            shell: None,
            shell_args: None,
            verbose: true,
            asynchronous: true,
            timeout_secs: None,
        }
    }
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Encoding of command output.
    pub encoding: Encoding,
    /// Strip ANSI escape sequences.
    pub strip_ansi: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log filter: a bare level (error, warn, info, debug, trace) or an
    /// `EnvFilter` directive such as `toolbox=debug`.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(shell) = std::env::var("TOOLBOX_SHELL") {
            if !shell.trim().is_empty() {
                self.execution.shell = Some(shell);
            }
        }

        if let Ok(verbose) = std::env::var("TOOLBOX_VERBOSE") {
            if let Some(verbose) = parse_bool(&verbose) {
                self.execution.verbose = verbose;
            }
        }

        if let Ok(timeout) = std::env::var("TOOLBOX_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.execution.timeout_secs = Some(secs);
            }
        }

        if let Ok(level) = std::env::var("TOOLBOX_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref shell) = args.shell {
            self.execution.shell = Some(shell.clone());
        }

        if !args.shell_args.is_empty() {
            self.execution.shell_args = Some(args.shell_args.clone());
        }

        if args.quiet {
            self.execution.verbose = false;
        }

        if args.sync {
            self.execution.asynchronous = false;
        }

        if let Some(secs) = args.timeout {
            self.execution.timeout_secs = Some(secs);
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Build execution options for the given platform.
    pub fn to_execution_options(&self, platform: &Platform) -> ExecutionOptions {
        let mut options = ExecutionOptions::for_platform(platform)
            .asynchronous(self.execution.asynchronous)
            .verbose(self.execution.verbose)
            .encoding(self.output.encoding)
            .strip_ansi(self.output.strip_ansi);

        if let Some(ref shell) = self.execution.shell {
            options = options.shell(shell.clone());
        }
        if let Some(ref args) = self.execution.shell_args {
            options = options.shell_args(args.iter().cloned());
        }
        if let Some(secs) = self.execution.timeout_secs {
            options = options.timeout(Duration::from_secs(secs));
        }

        options
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
