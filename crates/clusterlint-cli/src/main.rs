//! Clusterlint CLI - validate cluster provisioning manifests against AWS constraints
//!
//! This is the main entry point for the `clusterlint` binary, providing
//! commands for validating manifests and inspecting the machine type catalog.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use clusterlint_core::AwsValidator;
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    // A broken config file is reported before logging exists
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Held until exit so buffered file logs are flushed
    let _log_guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    match run(cli, config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => {
            let catalog = config.machine_type_catalog(cli.catalog.as_deref())?;
            let validator = AwsValidator::new(catalog);
            handlers::handle_validate(args, &validator, &mut output)
        }
        Commands::MachineType(args) => {
            let catalog = config.machine_type_catalog(cli.catalog.as_deref())?;
            handlers::handle_machine_type(args, &catalog, &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(
    cli: &Cli,
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_config(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["clusterlint", "-vv", "validate", "cluster.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["clusterlint", "--quiet", "validate", "cluster.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_run_machine_type_with_default_config() {
        let cli = Cli::parse_from(["clusterlint", "-o", "json", "machine-type", "m5.large"]);
        assert!(run(cli, Config::default(), false).is_ok());
    }

    #[test]
    fn test_run_reports_unknown_machine_type() {
        let cli = Cli::parse_from(["clusterlint", "-o", "json", "machine-type", "nope.large"]);
        let err = run(cli, Config::default(), false).unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
