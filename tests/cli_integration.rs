//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use toolbox::cli::{parse_args_from, Args, Subcommand};
use toolbox::config::Config;
use toolbox::{Encoding, Platform};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("toolbox")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.command.is_none());
    assert!(result.config.is_none());
    assert!(result.shell.is_none());
    assert!(result.timeout.is_none());
    assert!(!result.quiet);
}

#[test]
fn test_cli_run_with_options() {
    let result = parse_args_from(args(&[
        "-c",
        "/etc/toolbox.json",
        "--quiet",
        "--timeout",
        "30",
        "run",
        "ls",
        "-axpl",
    ]))
    .unwrap();

    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/toolbox.json"
    );
    assert!(result.quiet);
    assert_eq!(result.timeout, Some(30));
    assert_eq!(
        result.command,
        Some(Subcommand::Run(vec!["ls".to_string(), "-axpl".to_string()]))
    );
}

#[test]
fn test_cli_options_after_run_belong_to_command() {
    let result = parse_args_from(args(&["run", "grep", "-q", "x"])).unwrap();

    assert!(!result.quiet);
    assert_eq!(
        result.command,
        Some(Subcommand::Run(vec![
            "grep".to_string(),
            "-q".to_string(),
            "x".to_string()
        ]))
    );
}

#[test]
fn test_cli_invalid_timeout() {
    assert!(parse_args_from(args(&["--timeout", "later", "run", "true"])).is_err());
}

#[test]
fn test_cli_unknown_flag() {
    assert!(parse_args_from(args(&["--bogus"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "execution": {
            "shell": "/bin/bash",
            "shell_args": ["--login", "-c"],
            "verbose": false,
            "asynchronous": false,
            "timeout_secs": 12
        },
        "output": {
            "encoding": "utf16le",
            "strip_ansi": true
        },
        "logging": {
            "level": "debug"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.execution.shell.as_deref(), Some("/bin/bash"));
    assert_eq!(
        config.execution.shell_args,
        Some(vec!["--login".to_string(), "-c".to_string()])
    );
    assert!(!config.execution.verbose);
    assert!(!config.execution.asynchronous);
    assert_eq!(config.execution.timeout_secs, Some(12));
    assert_eq!(config.output.encoding, Encoding::Utf16Le);
    assert!(config.output.strip_ansi);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_priority_cli_over_file() {
    let json = r#"{
        "execution": {
            "shell": "/bin/bash",
            "timeout_secs": 60
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        shell: Some("/bin/sh".to_string()),
        timeout: Some(5),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();

    assert_eq!(config.execution.shell.as_deref(), Some("/bin/sh"));
    assert_eq!(config.execution.timeout_secs, Some(5));
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some("/definitely/not/here/toolbox.json".into()),
        ..Args::default()
    };

    let err = Config::load(&args).unwrap_err();
    assert!(err.to_string().contains("read"));
}

#[test]
fn test_config_to_execution_options() {
    let args = Args {
        shell: Some("/bin/sh".to_string()),
        shell_args: vec!["-c".to_string()],
        quiet: true,
        sync: true,
        timeout: Some(2),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    let options = config.to_execution_options(&Platform::detect());

    assert_eq!(options.shell, "/bin/sh");
    assert_eq!(options.shell_args, vec!["-c"]);
    assert!(!options.verbose);
    assert!(!options.asynchronous);
    assert_eq!(options.timeout, Some(Duration::from_secs(2)));
}

// ============================================================================
// Configuration Serialization Tests
// ============================================================================

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let json = serde_json::to_string(&original).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(original.execution.verbose, loaded.execution.verbose);
    assert_eq!(original.output.encoding, loaded.output.encoding);
}

#[test]
fn test_config_partial_deserialization() {
    let json = r#"{"output": {"strip_ansi": true}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert!(config.output.strip_ansi);
    assert_eq!(config.output.encoding, Encoding::Utf8);
    assert!(config.execution.verbose);
    assert!(config.execution.asynchronous);
    assert_eq!(config.logging.level, toolbox::logging::DEFAULT_FILTER);
}
