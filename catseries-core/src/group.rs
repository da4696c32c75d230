//! Grouper — partition merged records by category and attach subtotals.

use crate::domain::{GroupedCategory, GroupedSeries, SeriesPoint};
use crate::merge::MergeOutput;
use std::collections::BTreeMap;

/// Group merged records by category.
///
/// Relies on the merger's ordering: points within a category keep their
/// timestamp order. The grand total is carried over from the merge as-is.
pub fn group(merged: &MergeOutput) -> GroupedSeries {
    let mut categories: BTreeMap<String, GroupedCategory> = BTreeMap::new();

    for record in &merged.records {
        let entry = categories
            .entry(record.category.clone())
            .or_insert_with(|| GroupedCategory {
                points: Vec::new(),
                subtotal: 0.0,
            });
        entry.points.push(SeriesPoint {
            timestamp: record.timestamp,
            value: record.value,
        });
        entry.subtotal += record.value;
    }

    GroupedSeries {
        categories,
        grand_total: merged.grand_total,
    }
}
