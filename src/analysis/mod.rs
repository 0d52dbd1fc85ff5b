//! Aggregation over degree-award records.

pub mod aggregator;

pub use aggregator::*;
