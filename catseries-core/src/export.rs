//! Export — JSON run reports and CSV dumps of merged records.

use crate::domain::MergedRecord;
use crate::pipeline::RunReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer: {0}")]
    Buffer(String),
}

/// Serialize a run report to pretty JSON.
pub fn export_report_json(report: &RunReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Export merged records as CSV.
///
/// Columns: timestamp, date, category, value. `date` is the UTC calendar date
/// of the timestamp (`YYYY-MM-DD`), empty when out of range.
pub fn export_merged_csv(records: &[MergedRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["timestamp", "date", "category", "value"])?;

    for r in records {
        let date = chrono::DateTime::from_timestamp_millis(r.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        wtr.write_record([
            &r.timestamp.to_string(),
            &date,
            &r.category,
            &r.value.to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanonicalRecord;

    #[test]
    fn csv_has_header_and_rows() {
        let csv = export_merged_csv(&[
            CanonicalRecord::new(0, "CAT 1", 5.0),
            CanonicalRecord::new(1_475_193_600_000, "CAT 2", 1.25),
        ])
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,date,category,value");
        assert_eq!(lines[1], "0,1970-01-01,CAT 1,5");
        assert_eq!(lines[2], "1475193600000,2016-09-30,CAT 2,1.25");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_records_export_header_only() {
        let csv = export_merged_csv(&[]).unwrap();
        assert_eq!(csv, "timestamp,date,category,value\n");
    }
}
