//! UHDegrees - aggregate statistics over University of Hawaii degree awards.
//!
//! The [`analysis`] module holds the aggregation functions. They borrow a
//! slice of [`Record`]s (or any iterator of `&Record`) and never mutate it.
//!
//! ```
//! use uhdegrees::{analysis, Record};
//!
//! let records: Vec<Record> = serde_json::from_str(
//!     r#"[{"AWARDS": 3, "HAWAIIAN_LEGACY": "HAWAIIAN"}, {"AWARDS": 1}]"#,
//! ).unwrap();
//!
//! assert_eq!(analysis::sum_awards(&records), Ok(4.0));
//! assert_eq!(analysis::percentage_hawaiian(&records), Ok(75.0));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod report;

pub use error::AggregateError;
pub use models::{AwardsValue, FiscalYear, Record};
