//! Folio CLI library
//!
//! This module contains the core CLI logic for the Folio identifier tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, io::Write};

use log::info;

use folio::{FolioError, IdentifierEngine};

use error_adapter::{DiagnosticAdapter, Reportable, render};

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every identifier was valid.
    Clean,
    /// `check` found this many invalid lines.
    Failures(usize),
}

/// Run the Folio CLI application
///
/// Results are written to `out`: expanded pages, the normalized identifier,
/// or the rendered report of every flagged line for `check`.
///
/// # Errors
///
/// Returns `FolioError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid identifiers passed to `expand` or `normalize`
pub fn run(args: &Args, out: &mut impl Write) -> Result<Status, FolioError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let engine = IdentifierEngine::new(app_config)?;

    match &args.command {
        Command::Check { input } => check(&engine, input, out),
        Command::Expand { identifier } => {
            info!(identifier; "Expanding identifier");
            for page in engine.expand(identifier)? {
                writeln!(out, "{page}")?;
            }
            Ok(Status::Clean)
        }
        Command::Normalize { identifiers } => {
            info!(identifiers = identifiers.len(); "Normalizing identifiers");
            let range = engine.normalize(identifiers)?;
            writeln!(out, "{range}")?;
            Ok(Status::Clean)
        }
    }
}

fn check(engine: &IdentifierEngine, input: &str, out: &mut impl Write) -> Result<Status, FolioError> {
    info!(input_path = input; "Checking identifiers");

    let text = fs::read_to_string(input)?;
    let report = engine.check_batch(&text);

    for line in report.lines() {
        let Some(diag) = line.diagnostic() else {
            continue;
        };
        let reportable = Reportable::Diagnostic(DiagnosticAdapter::new(diag, line.source()));

        writeln!(out, "line {}: {}", line.line(), line.source())?;
        writeln!(out, "{}", render(&reportable))?;
    }

    writeln!(
        out,
        "{} checked, {} invalid, {} not canonical",
        report.lines().len(),
        report.failures(),
        report.warnings()
    )?;

    if report.has_failures() {
        Ok(Status::Failures(report.failures()))
    } else {
        Ok(Status::Clean)
    }
}
