//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation.

use crate::config::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

/// UHDegrees - statistics over University of Hawaii degrees awarded
///
/// Loads a JSON export of the "Degrees Awarded" data set and reports
/// total awards, the Hawaiian share, per-campus and per-year totals and
/// the doctoral programs on offer.
///
/// Examples:
///   uhdegrees --data uhdata.json
///   uhdegrees --data uhdata.json --year 2012 --format json
///   uhdegrees --data uhdata.json --output summary.md
///   uhdegrees --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file holding the degree-award records
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "UHDEGREES_DATA",
        required_unless_present = "init_config"
    )]
    pub data: Option<PathBuf>,

    /// Fiscal year to report on its own
    ///
    /// Default: from config or 2010.
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<i64>,

    /// Match FISCAL_YEAR as text ("2010") instead of as a number
    #[arg(long)]
    pub year_as_text: bool,

    /// Output format (markdown, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .uhdegrees.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .uhdegrees.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match self.data {
            None => return Err("A data file is required (--data FILE)".to_string()),
            Some(ref path) if !path.is_file() => {
                return Err(format!("Data file does not exist: {}", path.display()));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(data: Option<PathBuf>) -> Args {
        Args {
            data,
            year: None,
            year_as_text: false,
            format: None,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::parse_from([
            "uhdegrees", "--data", "uhdata.json", "--year", "2012", "--format", "json",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("uhdata.json")));
        assert_eq!(args.year, Some(2012));
        assert_eq!(args.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_validation_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = make_args(Some(file.path().to_path_buf()));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_file() {
        let args = make_args(Some(PathBuf::from("/nonexistent/uhdata.json")));
        assert!(args.validate().is_err());

        let args = make_args(None);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_init_config_skips_checks() {
        let mut args = make_args(None);
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut args = make_args(Some(file.path().to_path_buf()));
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(None);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
