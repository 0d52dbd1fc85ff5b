//! UHDegrees - University of Hawaii degrees-awarded statistics
//!
//! Loads a JSON export of the data set, runs the standard queries and
//! prints a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (invalid arguments, unreadable data, malformed AWARDS, ...)

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use uhdegrees::cli::Args;
use uhdegrees::config::{Config, ReportFormat, CONFIG_FILE};
use uhdegrees::dataset;
use uhdegrees::report::{self, DegreeSummary};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("UHDegrees v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the report
    if let Err(e) = run(&args) {
        error!("Report failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .uhdegrees.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report on stdout stays clean.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the data, compute the summary and write the report.
fn run(args: &Args) -> Result<()> {
    // Load configuration, CLI arguments override the file
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let data_path = args
        .data
        .as_deref()
        .context("A data file is required (--data FILE)")?;

    // Load the data set
    let records = dataset::load_dataset(data_path)?;
    if records.is_empty() {
        warn!("Data set {} contains no records", data_path.display());
    }

    // Compute the summary
    let year = config.query.fiscal_year();
    let summary = DegreeSummary::compute(&records, &year, &data_path.display().to_string())
        .with_context(|| format!("Failed to aggregate {}", data_path.display()))?;

    // Render and write the report
    let output = match config.report.format {
        ReportFormat::Json => report::generate_json_report(&summary)?,
        ReportFormat::Markdown => report::generate_markdown_report(&summary, &config.report),
    };

    let output_path = config.general.output.as_deref().map(Path::new);
    report::write_report(&output, output_path)?;

    if let Some(path) = output_path {
        info!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
