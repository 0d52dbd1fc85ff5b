//! The standard set of queries over a data set, gathered for reporting.

use crate::analysis;
use crate::error::AggregateError;
use crate::models::{FiscalYear, Record};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Award total for one campus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampusTotal {
    /// `None` for records that carry no campus.
    pub campus: Option<String>,
    pub awards: f64,
}

/// Award total for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: Option<FiscalYear>,
    pub awards: f64,
}

/// Metadata about the summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    /// Where the records came from.
    pub source: String,
    /// Number of records summarized.
    pub records: usize,
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
}

/// Results of the standard degree queries.
#[derive(Debug, Clone, Serialize)]
pub struct DegreeSummary {
    pub metadata: SummaryMetadata,
    pub total_awards: f64,
    pub hawaiian_awards: f64,
    /// `None` when the total is zero.
    pub percentage_hawaiian: Option<f64>,
    pub year: FiscalYear,
    pub awards_in_year: f64,
    pub campuses: Vec<Option<String>>,
    pub awards_by_campus: Vec<CampusTotal>,
    pub awards_by_year: Vec<YearTotal>,
    /// `None` for an empty data set.
    pub max_yearly_awards: Option<f64>,
    pub doctoral_programs: Vec<Option<String>>,
}

impl DegreeSummary {
    /// Run every query over `records`.
    ///
    /// Any malformed `AWARDS` value aborts the whole summary.
    pub fn compute(
        records: &[Record],
        year: &FiscalYear,
        source: &str,
    ) -> Result<Self, AggregateError> {
        let total_awards = analysis::sum_awards(records)?;
        let hawaiian_awards = analysis::sum_hawaiian_awards(records)?;

        let percentage_hawaiian = match analysis::percentage_hawaiian(records) {
            Ok(pct) => Some(pct),
            Err(AggregateError::ZeroTotal) => {
                warn!("Total awards is zero; Hawaiian percentage is not reported");
                None
            }
            Err(e) => return Err(e),
        };

        let awards_by_campus = analysis::sum_awards_by_campus(records)?
            .into_iter()
            .map(|(campus, awards)| CampusTotal {
                campus: campus.map(String::from),
                awards,
            })
            .collect();

        let awards_by_year = analysis::yearly_awards(records)?
            .into_iter()
            .map(|(year, awards)| YearTotal {
                year: year.cloned(),
                awards,
            })
            .collect();

        let summary = Self {
            metadata: SummaryMetadata {
                source: source.to_string(),
                records: records.len(),
                generated_at: Utc::now(),
            },
            total_awards,
            hawaiian_awards,
            percentage_hawaiian,
            year: year.clone(),
            awards_in_year: analysis::sum_awards_by_year(records, year)?,
            campuses: owned_strings(analysis::list_campuses(records)),
            awards_by_campus,
            awards_by_year,
            max_yearly_awards: analysis::max_yearly_awards(records)?,
            doctoral_programs: owned_strings(analysis::list_doctoral_programs(records)),
        };

        info!(
            "Summarized {} records: {} awards across {} campuses",
            summary.metadata.records,
            summary.total_awards,
            summary.campuses.len()
        );

        Ok(summary)
    }
}

fn owned_strings(values: Vec<Option<&str>>) -> Vec<Option<String>> {
    values
        .into_iter()
        .map(|value| value.map(String::from))
        .collect()
}
