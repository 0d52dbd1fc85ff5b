//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.uhdegrees.toml` files.

use crate::models::FiscalYear;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".uhdegrees.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Query settings.
    #[serde(default)]
    pub query: QueryConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report output path; stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Settings for the per-year query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Fiscal year reported on its own.
    #[serde(default = "default_year")]
    pub year: i64,

    /// Match `FISCAL_YEAR` as text ("2010") rather than as a number.
    #[serde(default)]
    pub year_as_text: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            year_as_text: false,
        }
    }
}

fn default_year() -> i64 {
    2010
}

impl QueryConfig {
    /// The configured year in the representation used for matching.
    pub fn fiscal_year(&self) -> FiscalYear {
        if self.year_as_text {
            FiscalYear::Text(self.year.to_string())
        } else {
            FiscalYear::Number(self.year)
        }
    }
}

/// Report output format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,

    /// Include the per-campus table.
    #[serde(default = "default_true")]
    pub include_campus_table: bool,

    /// Include the per-year table.
    #[serde(default = "default_true")]
    pub include_year_table: bool,

    /// Include the doctoral program list.
    #[serde(default = "default_true")]
    pub include_programs: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            include_campus_table: true,
            include_year_table: true,
            include_programs: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.uhdegrees.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(year) = args.year {
            self.query.year = year;
        }
        if args.year_as_text {
            self.query.year_as_text = true;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }

        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
