//! Pipeline orchestration: acquire → normalize → merge → group → chart payload.
//!
//! Acquisition is the only step that waits on anything. Everything after it is
//! a synchronous chain where each stage consumes the previous stage's output.

use crate::adapters::AdaptError;
use crate::config::ChartOptions;
use crate::domain::{GroupedSeries, MergedRecord, SourceId};
use crate::fingerprint::InputFingerprint;
use crate::group::group;
use crate::merge::{merge, MergeOutput};
use crate::normalize::normalize;
use crate::presentation::{chart_payload, ChartPayload};
use crate::source::{acquire, FetchError, RawPayloads, SourceProvider};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Current report layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// Run-level failures. Both abort the run; nothing partial is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch {origin}: {error}")]
    FetchFailure {
        origin: SourceId,
        #[source]
        error: FetchError,
    },

    #[error("malformed record in {origin}, item {index}: {reason}")]
    MalformedRecord {
        origin: SourceId,
        index: usize,
        reason: AdaptError,
    },
}

/// Output of the synchronous stages for one set of payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSeries {
    /// Number of canonical records produced by the normalizer.
    pub canonical_count: usize,
    pub merged: MergeOutput,
    pub grouped: GroupedSeries,
}

/// Everything a run hands to the presentation layer, serializable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub schema_version: u32,
    pub fingerprint: InputFingerprint,
    pub canonical_count: usize,
    pub merged: Vec<MergedRecord>,
    pub grouped: GroupedSeries,
    pub chart: ChartPayload,
}

impl RunReport {
    pub fn grand_total(&self) -> f64 {
        self.grouped.grand_total
    }
}

/// Normalize, merge and group already-acquired payloads.
pub fn process(payloads: &RawPayloads) -> Result<ProcessedSeries, PipelineError> {
    let canonical = normalize(payloads).map_err(|e| {
        warn!(error = %e, "normalization aborted");
        e
    })?;
    let canonical_count = canonical.len();
    let merged = merge(canonical);
    let grouped = group(&merged);

    Ok(ProcessedSeries {
        canonical_count,
        merged,
        grouped,
    })
}

/// Build the full report for already-acquired payloads.
pub fn report(payloads: &RawPayloads, chart: &ChartOptions) -> Result<RunReport, PipelineError> {
    let fingerprint = InputFingerprint::of(payloads);
    let processed = process(payloads)?;
    let chart = chart_payload(&processed.grouped, chart);

    info!(
        fingerprint = fingerprint.short(),
        raw = payloads.len(),
        merged = processed.merged.records.len(),
        categories = processed.grouped.categories.len(),
        grand_total = processed.grouped.grand_total,
        "pipeline run complete"
    );

    Ok(RunReport {
        schema_version: SCHEMA_VERSION,
        fingerprint,
        canonical_count: processed.canonical_count,
        merged: processed.merged.records,
        grouped: processed.grouped,
        chart,
    })
}

/// One full run: wait for all three sources, then process them.
pub fn run<P: SourceProvider + ?Sized>(
    provider: &P,
    chart: &ChartOptions,
) -> Result<RunReport, PipelineError> {
    let payloads = acquire(provider)?;
    report(&payloads, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payloads() -> RawPayloads {
        RawPayloads {
            a: vec![json!({"d": 1000, "cat": "cat 1", "value": 5})],
            b: vec![json!({"myDate": "1970-01-01", "categ": "CAT 1", "val": 2})],
            c: vec![json!({"raw": "#CAT 1# occurred on 1970-01-01", "val": 3})],
        }
    }

    #[test]
    fn process_runs_all_stages() {
        let out = process(&payloads()).unwrap();
        assert_eq!(out.canonical_count, 3);
        assert_eq!(out.merged.records.len(), 2);
        assert_eq!(out.grouped.category("CAT 1").unwrap().subtotal, 10.0);
        assert_eq!(out.grouped.grand_total, 10.0);
    }

    #[test]
    fn report_carries_fingerprint_and_chart() {
        let report = report(&payloads(), &ChartOptions::default()).unwrap();
        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.fingerprint, InputFingerprint::of(&payloads()));
        assert_eq!(report.chart.pie.len(), 1);
        assert_eq!(report.chart.pie[0].percentage, 100.0);
        assert!(report.chart.pie[0].highlighted);
        assert_eq!(report.grand_total(), 10.0);
    }

    #[test]
    fn error_messages_name_source_and_item() {
        let mut p = payloads();
        p.c[0] = json!({"raw": "#CAT 1# no date", "val": 1});
        let err = process(&p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed record in source C, item 0: no YYYY-MM-DD date found in \"#CAT 1# no date\""
        );
    }

    #[test]
    fn fetch_failure_keeps_its_cause() {
        use std::error::Error as _;

        let err = PipelineError::FetchFailure {
            origin: SourceId::A,
            error: FetchError::HttpStatus {
                status: 503,
                location: "http://example.test/data1.json".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch source A: HTTP 503 from http://example.test/data1.json"
        );
        assert!(err.source().is_some());
    }
}
