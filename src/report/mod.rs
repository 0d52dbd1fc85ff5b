//! Summary building and report rendering.

pub mod generator;
pub mod summary;

pub use generator::{generate_json_report, generate_markdown_report, write_report};
pub use summary::{CampusTotal, DegreeSummary, SummaryMetadata, YearTotal};
