//! Data models for degree-award records.
//!
//! A [`Record`] is one row of the University of Hawaii "Degrees Awarded"
//! data set. Field names on the wire are the upstream column names
//! (`AWARDS`, `FISCAL_YEAR`, ...); unknown columns are ignored.

use crate::error::AggregateError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// `HAWAIIAN_LEGACY` value that flags a Hawaiian-heritage record.
pub const HAWAIIAN: &str = "HAWAIIAN";

/// `OUTCOME` value that flags a doctoral record.
pub const DOCTORAL_DEGREES: &str = "Doctoral Degrees";

/// Raw content of an `AWARDS` field.
///
/// Numeric counts are kept as numbers; anything else is retained verbatim so
/// the aggregation that needs the count can report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AwardsValue {
    /// A numeric award count.
    Count(f64),
    /// A value of any other JSON type (string, bool, null, ...).
    Malformed(serde_json::Value),
}

/// Fiscal year as stored in the data set.
///
/// Equality is type-sensitive: `Number(2010)` never equals `Text("2010")`.
/// Integral floats such as `2010.0` are read as `Number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FiscalYear {
    Number(i64),
    Text(String),
    /// Any other JSON value, kept as its JSON text.
    Other(String),
}

impl<'de> Deserialize<'de> for FiscalYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(year), _) => FiscalYear::Number(year),
                (None, Some(f))
                    if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f) =>
                {
                    FiscalYear::Number(f as i64)
                }
                _ => FiscalYear::Other(n.to_string()),
            },
            Value::String(s) => FiscalYear::Text(s),
            other => FiscalYear::Other(other.to_string()),
        })
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiscalYear::Number(n) => write!(f, "{}", n),
            FiscalYear::Text(s) | FiscalYear::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FiscalYear {
    fn from(year: i64) -> Self {
        FiscalYear::Number(year)
    }
}

impl From<&str> for FiscalYear {
    fn from(year: &str) -> Self {
        FiscalYear::Text(year.to_string())
    }
}

/// One degree-award observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Number of degrees awarded.
    #[serde(
        rename = "AWARDS",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub awards: Option<AwardsValue>,

    /// Hawaiian legacy classification.
    #[serde(
        rename = "HAWAIIAN_LEGACY",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hawaiian_legacy: Option<String>,

    /// Fiscal year of the award.
    #[serde(rename = "FISCAL_YEAR", default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<FiscalYear>,

    /// Awarding campus.
    #[serde(
        rename = "CAMPUS",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub campus: Option<String>,

    /// Degree level, e.g. "Doctoral Degrees".
    #[serde(
        rename = "OUTCOME",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome: Option<String>,

    /// Degree program name.
    #[serde(
        rename = "CIP_DESC",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cip_desc: Option<String>,
}

// A present `AWARDS: null` is a malformed value, not a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<AwardsValue>, D::Error>
where
    D: Deserializer<'de>,
{
    AwardsValue::deserialize(deserializer).map(Some)
}

// Text columns accept any JSON value; non-strings keep their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl Record {
    /// Returns the validated award count of this record.
    pub fn award_count(&self) -> Result<f64, AggregateError> {
        match &self.awards {
            None => Err(AggregateError::MissingField),
            Some(AwardsValue::Count(n)) => Ok(*n),
            Some(AwardsValue::Malformed(_)) => Err(AggregateError::InvalidValue),
        }
    }

    /// Whether the record is flagged as Hawaiian heritage.
    pub fn is_hawaiian(&self) -> bool {
        self.hawaiian_legacy.as_deref() == Some(HAWAIIAN)
    }

    /// Whether the record is a doctoral degree award.
    pub fn is_doctoral(&self) -> bool {
        self.outcome.as_deref() == Some(DOCTORAL_DEGREES)
    }

    /// Whether the record was awarded in exactly `year`.
    pub fn in_year(&self, year: &FiscalYear) -> bool {
        self.fiscal_year.as_ref() == Some(year)
    }

    pub fn campus(&self) -> Option<&str> {
        self.campus.as_deref()
    }

    pub fn program(&self) -> Option<&str> {
        self.cip_desc.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_full_record() {
        let r = record(json!({
            "AWARDS": 42,
            "HAWAIIAN_LEGACY": "HAWAIIAN",
            "FISCAL_YEAR": 2010,
            "CAMPUS": "Manoa",
            "OUTCOME": "Doctoral Degrees",
            "CIP_DESC": "Oceanography",
            "IRO_INSTITUTION_DESC": "University of Hawaii at Manoa"
        }));

        assert_eq!(r.award_count(), Ok(42.0));
        assert!(r.is_hawaiian());
        assert!(r.is_doctoral());
        assert!(r.in_year(&FiscalYear::Number(2010)));
        assert_eq!(r.campus(), Some("Manoa"));
        assert_eq!(r.program(), Some("Oceanography"));
    }

    #[test]
    fn test_award_count_validation() {
        assert_eq!(
            record(json!({"foo": "bar"})).award_count(),
            Err(AggregateError::MissingField)
        );
        assert_eq!(
            record(json!({"AWARDS": "bar"})).award_count(),
            Err(AggregateError::InvalidValue)
        );
        assert_eq!(
            record(json!({"AWARDS": null})).award_count(),
            Err(AggregateError::InvalidValue)
        );
        assert_eq!(record(json!({"AWARDS": 2.5})).award_count(), Ok(2.5));
    }

    #[test]
    fn test_fiscal_year_is_type_sensitive() {
        let numeric = record(json!({"FISCAL_YEAR": 2010}));
        let text = record(json!({"FISCAL_YEAR": "2010"}));

        assert!(numeric.in_year(&FiscalYear::Number(2010)));
        assert!(!numeric.in_year(&"2010".into()));
        assert!(text.in_year(&"2010".into()));
        assert!(!text.in_year(&FiscalYear::Number(2010)));
    }

    #[test]
    fn test_fiscal_year_accepts_any_json_value() {
        let float = record(json!({"FISCAL_YEAR": 2010.0}));
        assert!(float.in_year(&FiscalYear::Number(2010)));

        let fractional = record(json!({"FISCAL_YEAR": 2010.5}));
        assert_eq!(fractional.fiscal_year, Some(FiscalYear::Other("2010.5".to_string())));
        assert!(!fractional.in_year(&"2010.5".into()));

        let boolean = record(json!({"FISCAL_YEAR": true}));
        assert_eq!(boolean.fiscal_year, Some(FiscalYear::Other("true".to_string())));

        assert_eq!(record(json!({"FISCAL_YEAR": null})).fiscal_year, None);
    }

    #[test]
    fn test_text_fields_accept_any_json_value() {
        let r = record(json!({
            "AWARDS": 2,
            "CAMPUS": 7,
            "HAWAIIAN_LEGACY": true,
            "OUTCOME": ["Doctoral Degrees"],
            "CIP_DESC": null
        }));

        assert_eq!(r.award_count(), Ok(2.0));
        assert_eq!(r.campus(), Some("7"));
        assert!(!r.is_hawaiian());
        assert!(!r.is_doctoral());
        assert_eq!(r.program(), None);
    }

    #[test]
    fn test_flags_are_exact_matches() {
        assert!(!record(json!({"HAWAIIAN_LEGACY": "hawaiian"})).is_hawaiian());
        assert!(!record(json!({"HAWAIIAN_LEGACY": "NOT HAWAIIAN"})).is_hawaiian());
        assert!(!record(json!({})).is_hawaiian());
        assert!(!record(json!({"OUTCOME": "Doctoral degrees"})).is_doctoral());
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let r = Record {
            awards: Some(AwardsValue::Count(3.0)),
            campus: Some("Hilo".to_string()),
            ..Record::default()
        };
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value, json!({"AWARDS": 3.0, "CAMPUS": "Hilo"}));
    }
}
