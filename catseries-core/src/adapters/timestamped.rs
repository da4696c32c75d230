//! Source A: millisecond timestamps, lower-case categories, `value` field.

use super::{canonical_category, AdaptError, SourceAdapter};
use crate::domain::{CanonicalRecord, SourceId};
use serde::{Deserialize, Serialize};

/// Raw item from source A: `{"d": 1475186400000, "cat": "cat 1", "value": 12.5}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedItem {
    pub d: i64,
    pub cat: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampedAdapter;

impl SourceAdapter for TimestampedAdapter {
    type Raw = TimestampedItem;
    const SOURCE: SourceId = SourceId::A;

    fn adapt(&self, raw: TimestampedItem) -> Result<CanonicalRecord, AdaptError> {
        let category = canonical_category(&raw.cat)
            .ok_or_else(|| AdaptError::MissingCategory(raw.cat))?;
        Ok(CanonicalRecord::new(raw.d, category, raw.value))
    }
}
