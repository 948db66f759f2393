//! Command-line interface entry point for `registrar`

mod args;
mod commands;

use args::{Cli, Command};
use campus_registrar::config::Config;
use campus_registrar::core::RegistrarError;
use campus_registrar::info;
use campus_registrar::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;
use commands::{report_error, Session};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides for this run
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // Effective level: --log-level, then config logging.level, then warn
    let mut level = config.logging.level.parse().unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    if config.logging.verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = PathBuf::from(&config.logging.file);
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults).map_err(|e| {
                eprintln!("✗ {e}");
            })
        }
        command => run(command, &config).map_err(|e| report_error(&e)),
    };

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Load the records and run one record command against them
fn run(command: Command, config: &Config) -> Result<(), RegistrarError> {
    let mut session = Session::open(config)?;
    commands::execute(command, &mut session, &mut io::stdout().lock())
}
