//! Merger — sort canonical records, then fold equal (timestamp, category)
//! keys into one record by summing their values.
//!
//! Sort-then-fold needs no keyed accumulator and yields a deterministic
//! output order: timestamp ascending, category ascending on ties.

use crate::domain::{CanonicalRecord, MergedRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Merged records plus the grand total accumulated during the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutput {
    pub records: Vec<MergedRecord>,
    pub grand_total: f64,
}

/// Sort order of the merger: timestamp, then category.
pub fn merge_order(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.category.cmp(&b.category))
}

/// Merge canonical records. Consumes the input; the sort is stable.
pub fn merge(mut records: Vec<CanonicalRecord>) -> MergeOutput {
    let input_len = records.len();
    records.sort_by(merge_order);

    let mut merged: Vec<MergedRecord> = Vec::with_capacity(records.len());
    let mut current: Option<MergedRecord> = None;
    let mut grand_total = 0.0;

    for record in records {
        grand_total += record.value;

        if let Some(acc) = current.as_mut() {
            if acc.key() == record.key() {
                acc.value += record.value;
                continue;
            }
        }

        if let Some(done) = current.replace(record) {
            merged.push(done);
        }
    }

    if let Some(done) = current.take() {
        merged.push(done);
    }

    debug!(
        input = input_len,
        merged = merged.len(),
        grand_total,
        "merged canonical records"
    );

    MergeOutput {
        records: merged,
        grand_total,
    }
}
