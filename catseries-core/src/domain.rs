//! Domain types — the record shapes that flow through the pipeline.
//!
//! raw item → [`CanonicalRecord`] → [`MergedRecord`] → [`GroupedSeries`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the three upstream sources. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceId {
    A,
    B,
    C,
}

impl SourceId {
    /// All sources in normalization order.
    pub const ALL: [SourceId; 3] = [SourceId::A, SourceId::B, SourceId::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::A => "A",
            SourceId::B => "B",
            SourceId::C => "C",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source {}", self.as_str())
    }
}

/// A normalized `{timestamp, category, value}` observation.
///
/// `timestamp` is milliseconds since the Unix epoch (UTC) and `category` is
/// already in canonical form (`CAT <n>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub timestamp: i64,
    pub category: String,
    pub value: f64,
}

impl CanonicalRecord {
    pub fn new(timestamp: i64, category: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp,
            category: category.into(),
            value,
        }
    }

    /// Merge key: records with equal keys collapse into one.
    pub fn key(&self) -> (i64, &str) {
        (self.timestamp, self.category.as_str())
    }
}

/// A canonical record after summation; unique per (timestamp, category).
///
/// Same shape as [`CanonicalRecord`], so merged output can be fed back into
/// the merger unchanged.
pub type MergedRecord = CanonicalRecord;

/// One plotted point of a category series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub value: f64,
}

/// All merged points of one category plus its subtotal.
///
/// The subtotal is a separate field and never part of `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedCategory {
    pub points: Vec<SeriesPoint>,
    pub subtotal: f64,
}

/// Output of the grouper: category → series, plus the grand total as a sibling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    pub categories: BTreeMap<String, GroupedCategory>,
    pub grand_total: f64,
}

impl GroupedSeries {
    pub fn category(&self, name: &str) -> Option<&GroupedCategory> {
        self.categories.get(name)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.keys().map(|k| k.as_str()).collect()
    }

    /// Sum of every category subtotal. Equals `grand_total` for pipeline output.
    pub fn subtotal_sum(&self) -> f64 {
        self.categories.values().map(|c| c.subtotal).sum()
    }
}
