//! Stratum CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use stratum_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse arguments first; the config file is loaded by `run`
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Stratum");
    debug!(command:? = args.command; "Parsed arguments");

    // Run the selected command
    if let Err(err) = stratum_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // Render the error as a diagnostic, falling back to its message
        let mut writer = String::new();
        if reporter
            .render_report(&mut writer, &ErrorAdapter(&err))
            .is_err()
        {
            writer = err.to_string();
        }

        // `--log-level off` must not swallow the failure
        if log_level >= LevelFilter::Error {
            error!("{writer}");
        } else {
            eprintln!("{writer}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
