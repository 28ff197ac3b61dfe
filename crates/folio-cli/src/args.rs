//! Command-line argument definitions for the Folio CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the operation; the global flags
//! control configuration file selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Folio identifier tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a file with one identifier per line
    Check {
        /// Path to the identifier file
        input: String,
    },

    /// Print the pages an identifier refers to, one per line
    Expand {
        /// A page, transcription or translation identifier
        identifier: String,
    },

    /// Merge the pages of identifiers into one canonical page range
    Normalize {
        /// Page, transcription or translation identifiers
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "folio",
            "expand",
            "FN-PG-P1-01, 03",
            "--config",
            "folio.toml",
        ])
        .unwrap();

        assert_eq!(args.config.as_deref(), Some("folio.toml"));
        assert_eq!(args.log_level, "warn");
        assert!(matches!(args.command, Command::Expand { identifier } if identifier == "FN-PG-P1-01, 03"));
    }

    #[test]
    fn test_normalize_needs_identifiers() {
        assert!(Args::try_parse_from(["folio", "normalize"]).is_err());
    }
}
