//! toolbox binary entry point.

use std::io::Read;
use std::process::ExitCode;

use toolbox::cli::{self, Args, Subcommand};
use toolbox::config::Config;
use toolbox::execution::{CommandRunner, FAILURE};
use toolbox::{fs, logging, random, Platform};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'toolbox --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init_with_filter(Some(config.log_filter())).ok();
    debug!("toolbox v{}", env!("CARGO_PKG_VERSION"));

    let platform = Platform::detect();
    let code = dispatch(&args, &config, &platform).await;
    ExitCode::from(code.clamp(0, 255) as u8)
}

async fn dispatch(args: &Args, config: &Config, platform: &Platform) -> i32 {
    let Some(command) = &args.command else {
        cli::print_help();
        return 2;
    };

    match command {
        Subcommand::Run(tokens) => {
            let runner = CommandRunner::new(config.to_execution_options(platform));
            let mut code = FAILURE;
            runner
                .call(tokens.clone(), |err, rc| {
                    if let Some(err) = err {
                        error!("{}", err);
                    }
                    code = rc;
                })
                .await;
            code
        }
        Subcommand::Uuid { no_dash } => {
            println!("{}", random::get_uuid(*no_dash));
            0
        }
        Subcommand::Dirs(path) => match fs::get_directories(path) {
            Ok(dirs) => {
                for dir in dirs {
                    println!("{}", dir);
                }
                0
            }
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                1
            }
        },
        Subcommand::Random {
            min,
            max,
            inclusive,
        } => {
            let value = if *inclusive {
                random::get_random_int_inclusive(*min, *max)
            } else {
                random::get_random_int(*min, *max)
            };
            println!("{}", value);
            0
        }
        Subcommand::Lines(path) => {
            let data = match path {
                Some(path) => std::fs::read(path),
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf).map(|_| buf)
                }
            };
            match data {
                Ok(data) => {
                    let sanitizer = config.to_execution_options(platform).sanitizer();
                    for line in sanitizer.sanitize(&data) {
                        println!("{}", line);
                    }
                    0
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    1
                }
            }
        }
        Subcommand::Platform => {
            println!("os:        {}", platform.os);
            println!("is_win:    {}", platform.is_win);
            println!("is_darwin: {}", platform.is_darwin);
            println!("is_linux:  {}", platform.is_linux);
            0
        }
    }
}
