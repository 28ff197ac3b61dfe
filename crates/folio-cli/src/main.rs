//! Folio CLI entry point.

use std::{io, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use folio_cli::{
    Args, Status,
    error_adapter::{render, to_reportable},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

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

    info!(log_level:?; "Starting Folio");
    debug!(args:?; "Parsed arguments");

    let result = folio_cli::run(&args, &mut io::stdout().lock());
    match result {
        Ok(Status::Clean) => info!("Completed successfully"),
        Ok(Status::Failures(failures)) => {
            info!(failures; "Completed with invalid identifiers");
            process::exit(1);
        }
        Err(err) => {
            error!("{}", render(&to_reportable(&err)));
            process::exit(1);
        }
    }
}
