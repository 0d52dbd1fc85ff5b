//! Errors raised while aggregating degree records.

use thiserror::Error;

/// Failure of an aggregation over a set of records.
///
/// The `Display` text of the first two variants is part of the public
/// contract and matches what callers of the award totals expect to see.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    /// A record has no `AWARDS` field.
    #[error("No AWARDS field.")]
    MissingField,

    /// A record has an `AWARDS` field that is not a number.
    #[error("Non-numeric AWARDS.")]
    InvalidValue,

    /// The overall award total is zero, so a share of it cannot be computed.
    #[error("Total awards is zero; Hawaiian percentage is undefined.")]
    ZeroTotal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AggregateError::MissingField.to_string(), "No AWARDS field.");
        assert_eq!(
            AggregateError::InvalidValue.to_string(),
            "Non-numeric AWARDS."
        );
        assert!(AggregateError::ZeroTotal.to_string().contains("zero"));
    }
}
