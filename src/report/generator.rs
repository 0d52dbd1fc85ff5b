//! Report rendering.
//!
//! This module renders a [`DegreeSummary`] as Markdown or JSON and writes
//! it to a file or stdout.

use super::summary::{CampusTotal, DegreeSummary, SummaryMetadata, YearTotal};
use crate::config::ReportConfig;
use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Label for the group of records that lack the grouping field.
const NONE_LABEL: &str = "(none)";

/// Generate a complete Markdown report.
pub fn generate_markdown_report(summary: &DegreeSummary, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# UH Degrees Awarded Report\n\n");
    output.push_str(&generate_metadata_section(&summary.metadata));
    output.push_str(&generate_summary_section(summary));

    if config.include_campus_table {
        output.push_str(&generate_campus_section(&summary.awards_by_campus));
    }
    if config.include_year_table {
        output.push_str(&generate_year_section(&summary.awards_by_year));
    }
    if config.include_programs {
        output.push_str(&generate_programs_section(&summary.doctoral_programs));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &SummaryMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!("- **Records:** {}\n", metadata.records));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push('\n');

    section
}

/// Generate the headline numbers.
fn generate_summary_section(summary: &DegreeSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Measure | Value |\n");
    section.push_str("|:---|---:|\n");
    section.push_str(&format!("| Total awards | {} |\n", summary.total_awards));
    section.push_str(&format!(
        "| Hawaiian awards | {} |\n",
        summary.hawaiian_awards
    ));
    section.push_str(&format!(
        "| Hawaiian share | {} |\n",
        summary
            .percentage_hawaiian
            .map(|pct| format!("{:.2}%", pct))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    section.push_str(&format!(
        "| Awards in FY {} | {} |\n",
        summary.year, summary.awards_in_year
    ));
    section.push_str(&format!(
        "| Highest yearly awards | {} |\n",
        summary
            .max_yearly_awards
            .map(|max| max.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    ));
    section.push_str(&format!("| Campuses | {} |\n", summary.campuses.len()));
    section.push('\n');

    section
}

fn generate_campus_section(totals: &[CampusTotal]) -> String {
    if totals.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Awards by Campus\n\n");
    section.push_str("| Campus | Awards |\n");
    section.push_str("|:---|---:|\n");
    for total in totals {
        section.push_str(&format!(
            "| {} | {} |\n",
            or_none(&total.campus),
            total.awards
        ));
    }
    section.push('\n');

    section
}

fn generate_year_section(totals: &[YearTotal]) -> String {
    if totals.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Awards by Fiscal Year\n\n");
    section.push_str("| Fiscal Year | Awards |\n");
    section.push_str("|:---|---:|\n");
    for total in totals {
        section.push_str(&format!("| {} | {} |\n", or_none(&total.year), total.awards));
    }
    section.push('\n');

    section
}

fn generate_programs_section(programs: &[Option<String>]) -> String {
    let mut section = String::new();

    section.push_str("## Doctoral Programs\n\n");

    if programs.is_empty() {
        section.push_str("No doctoral degrees in this data set.\n\n");
        return section;
    }

    for program in programs {
        section.push_str(&format!("- {}\n", or_none(program)));
    }
    section.push('\n');

    section
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => NONE_LABEL.to_string(),
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by uhdegrees v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(summary: &DegreeSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

/// Write rendered report content to `path`, or to stdout when `path` is `None`.
pub fn write_report(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write report to stdout")?;
        }
    }

    Ok(())
}
