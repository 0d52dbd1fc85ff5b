//! Loading degree-award records from JSON.
//!
//! The data set is usually distributed as a JSON array of row objects. Two
//! other shapes show up in the wild and are accepted as well: an object with
//! the rows under `"data"`, and a script that assigns the array to a variable
//! (`var uhdata = [...];`).

use crate::models::Record;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Deserialize)]
struct WrappedRows {
    data: Vec<Record>,
}

/// Load all records from a file.
pub fn load_dataset(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;

    let records = parse_dataset(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from in-memory text.
pub fn parse_dataset(content: &str) -> Result<Vec<Record>> {
    let json = strip_assignment(content.trim());

    if json.is_empty() {
        bail!("Data set is empty");
    }

    // Each shape is parsed on its own so serde's error names the offending row.
    if json.starts_with('[') {
        serde_json::from_str(json).context("Invalid data set JSON")
    } else {
        let wrapped: WrappedRows =
            serde_json::from_str(json).context("Invalid data set JSON")?;
        Ok(wrapped.data)
    }
}

/// Reduce `var uhdata = [...];` to the bracketed array.
fn strip_assignment(content: &str) -> &str {
    if content.starts_with('[') || content.starts_with('{') {
        return content;
    }

    match content.find('[') {
        Some(start) => {
            debug!("Stripping script prefix before data array");
            content[start..].trim_end().trim_end_matches(';').trim_end()
        }
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::models::FiscalYear;
    use std::io::Write;

    const ROWS: &str = r#"[
        {"AWARDS": 1, "CAMPUS": "Manoa", "FISCAL_YEAR": 2010},
        {"AWARDS": 2, "CAMPUS": "Hilo", "FISCAL_YEAR": 2011}
    ]"#;

    #[test]
    fn test_parse_array() {
        let records = parse_dataset(ROWS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].campus(), Some("Hilo"));
    }

    #[test]
    fn test_parse_wrapped_object() {
        let content = format!(r#"{{"data": {}}}"#, ROWS);
        let records = parse_dataset(&content).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_script_assignment() {
        let content = format!("var uhdata = {};\n", ROWS);
        let records = parse_dataset(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].award_count(), Ok(1.0));
    }

    #[test]
    fn test_parse_keeps_malformed_awards() {
        let records = parse_dataset(r#"[{"AWARDS": "bar"}, {"foo": "bar"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].award_count().is_err());
        assert!(records[1].award_count().is_err());
    }

    #[test]
    fn test_parse_accepts_loose_column_types() {
        let records =
            parse_dataset(r#"[{"AWARDS":1,"FISCAL_YEAR":2010.0},{"AWARDS":2,"CAMPUS":7}]"#)
                .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].in_year(&FiscalYear::Number(2010)));
        assert_eq!(records[1].campus(), Some("7"));
        assert_eq!(analysis::sum_awards(&records), Ok(3.0));
    }

    #[test]
    fn test_parse_error_points_at_input() {
        let err = parse_dataset("[{\"AWARDS\": 1},\n {\"AWARDS\": }]").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid data set JSON"));
        assert!(message.contains("line 2"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_dataset("").is_err());
        assert!(parse_dataset("not json").is_err());
        assert!(parse_dataset(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROWS.as_bytes()).unwrap();

        let records = load_dataset(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_sample_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/uhdata_sample.json");
        let records = load_dataset(&path).unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(analysis::sum_awards(&records), Ok(560.0));
        assert_eq!(
            analysis::sum_awards_by_year(&records, &FiscalYear::Number(2010)),
            Ok(403.0)
        );
        assert_eq!(analysis::max_yearly_awards(&records), Ok(Some(403.0)));
        assert_eq!(
            analysis::list_doctoral_programs(&records),
            vec![Some("Pharmacy"), Some("Oceanography")]
        );
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/uhdata.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read data file"));
    }
}
