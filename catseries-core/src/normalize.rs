//! Normalizer — applies each source's adapter to its raw array and
//! concatenates the results in source order (A, then B, then C).
//!
//! The first item that fails to adapt aborts the whole normalization; no
//! partial canonical set is ever returned.

use crate::adapters::{CalendarAdapter, FreeTextAdapter, SourceAdapter, TimestampedAdapter};
use crate::domain::CanonicalRecord;
use crate::pipeline::PipelineError;
use crate::source::RawPayloads;
use serde_json::Value;
use tracing::debug;

/// Normalize all three payloads into one canonical array.
pub fn normalize(payloads: &RawPayloads) -> Result<Vec<CanonicalRecord>, PipelineError> {
    let mut records = Vec::with_capacity(payloads.len());

    records.extend(adapt_all(&TimestampedAdapter, &payloads.a)?);
    records.extend(adapt_all(&CalendarAdapter, &payloads.b)?);
    records.extend(adapt_all(&FreeTextAdapter, &payloads.c)?);

    debug!(records = records.len(), "normalized raw payloads");
    Ok(records)
}

/// Adapt every item of one source, failing on the first malformed item.
pub fn adapt_all<A: SourceAdapter>(
    adapter: &A,
    items: &[Value],
) -> Result<Vec<CanonicalRecord>, PipelineError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            adapter
                .adapt_value(item)
                .map_err(|reason| PipelineError::MalformedRecord {
                    origin: A::SOURCE,
                    index,
                    reason,
                })
        })
        .collect()
}
