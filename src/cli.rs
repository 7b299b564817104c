//! Command-line interface for toolbox.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Subcommand {
    /// Run a shell command; the tokens are joined with spaces.
    Run(Vec<String>),
    /// Print a v4 UUID.
    Uuid { no_dash: bool },
    /// List the subdirectories of a path.
    Dirs(PathBuf),
    /// Print a random integer.
    Random { min: f64, max: f64, inclusive: bool },
    /// Split a file (or stdin) into sanitized lines.
    Lines(Option<PathBuf>),
    /// Print the detected platform flags.
    Platform,
}

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Subcommand to execute.
    pub command: Option<Subcommand>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Shell override.
    pub shell: Option<String>,
    /// Shell arguments override (repeatable).
    pub shell_args: Vec<String>,
    /// Do not forward command output.
    pub quiet: bool,
    /// Block instead of streaming.
    pub sync: bool,
    /// Timeout in seconds.
    pub timeout: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("shell") => {
                result.shell = Some(parser.value()?.parse()?);
            }
            Long("shell-arg") => {
                result.shell_args.push(parser.value()?.parse()?);
            }
            Short('q') | Long("quiet") => {
                result.quiet = true;
            }
            Long("sync") => {
                result.sync = true;
            }
            Short('t') | Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                result.timeout = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("timeout", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                let name = val.to_string_lossy().into_owned();
                result.command = Some(parse_subcommand(&name, &mut parser)?);
                break;
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

fn parse_subcommand(name: &str, parser: &mut lexopt::Parser) -> Result<Subcommand, ArgsError> {
    use lexopt::prelude::*;

    match name {
        "run" => {
            let mut tokens = rest(parser)?;
            if tokens.first().map(String::as_str) == Some("--") {
                tokens.remove(0);
            }
            if tokens.is_empty() {
                return Err(ArgsError::MissingArgument("command"));
            }
            Ok(Subcommand::Run(tokens))
        }
        "uuid" => {
            let mut no_dash = false;
            while let Some(arg) = parser.next()? {
                match arg {
                    Short('n') | Long("no-dash") => no_dash = true,
                    Value(val) => {
                        return Err(ArgsError::UnexpectedArgument(
                            val.to_string_lossy().into(),
                        ))
                    }
                    _ => return Err(arg.unexpected().into()),
                }
            }
            Ok(Subcommand::Uuid { no_dash })
        }
        "dirs" => {
            let path = match parser.next()? {
                Some(Value(val)) => PathBuf::from(val),
                Some(arg) => return Err(arg.unexpected().into()),
                None => return Err(ArgsError::MissingArgument("path")),
            };
            expect_end(parser)?;
            Ok(Subcommand::Dirs(path))
        }
        "lines" => {
            let path = match parser.next()? {
                Some(Value(val)) => Some(PathBuf::from(val)),
                Some(arg) => return Err(arg.unexpected().into()),
                None => None,
            };
            expect_end(parser)?;
            Ok(Subcommand::Lines(path))
        }
        "random" => {
            // Raw tokens so negative bounds are not taken for flags.
            let mut inclusive = false;
            let mut bounds = Vec::new();
            for token in rest(parser)? {
                match token.as_str() {
                    "-i" | "--inclusive" => inclusive = true,
                    "--" => {}
                    _ => bounds.push(
                        token
                            .parse::<f64>()
                            .map_err(|_| ArgsError::InvalidValue("bound", token.clone()))?,
                    ),
                }
            }
            match bounds[..] {
                [min, max] => Ok(Subcommand::Random {
                    min,
                    max,
                    inclusive,
                }),
                [_] | [] => Err(ArgsError::MissingArgument("min and max")),
                _ => Err(ArgsError::UnexpectedArgument(format!("{:?}", bounds))),
            }
        }
        "platform" => {
            expect_end(parser)?;
            Ok(Subcommand::Platform)
        }
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn rest(parser: &mut lexopt::Parser) -> Result<Vec<String>, ArgsError> {
    Ok(parser
        .raw_args()?
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect())
}

fn expect_end(parser: &mut lexopt::Parser) -> Result<(), ArgsError> {
    match parser.next()? {
        None => Ok(()),
        Some(lexopt::Arg::Value(val)) => {
            Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()))
        }
        Some(arg) => Err(arg.unexpected().into()),
    }
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"toolbox {version}
Shell command runner and small utilities

USAGE:
    toolbox [OPTIONS] <COMMAND>

COMMANDS:
    run <command...>              Run a command in the configured shell
    uuid [-n|--no-dash]           Print a v4 UUID
    dirs <path>                   List subdirectories of a path
    random <min> <max> [-i]       Print a random integer (max exclusive unless -i)
    lines [file]                  Split a file (or stdin) into clean lines
    platform                      Print platform flags

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -s, --shell <PATH>      Shell used to run commands
        --shell-arg <ARG>   Argument placed before the command (repeatable)
    -q, --quiet             Do not print command output
        --sync              Block until the command exits instead of streaming
    -t, --timeout <SECS>    Kill the command after this many seconds
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    TOOLBOX_SHELL           Shell (overrides config)
    TOOLBOX_VERBOSE         Forward command output (true/false)
    TOOLBOX_TIMEOUT         Timeout in seconds
    TOOLBOX_LOG_LEVEL       Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    toolbox run ls -axpl
    toolbox --sync -t 10 run "make test"
    toolbox uuid --no-dash
    toolbox random 1 6 --inclusive
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("toolbox {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// Required argument missing.
    MissingArgument(&'static str),
    /// Unknown subcommand.
    UnknownCommand(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for {}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
            Self::MissingArgument(name) => write!(f, "missing argument: {}", name),
            Self::UnknownCommand(name) => write!(f, "unknown command: '{}'", name),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
