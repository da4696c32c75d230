//! Source B: `YYYY-MM-DD` calendar dates under `myDate`, category under `categ`.

use super::{canonical_category, parse_calendar_date, AdaptError, SourceAdapter};
use crate::domain::{CanonicalRecord, SourceId};
use serde::{Deserialize, Serialize};

/// Raw item from source B: `{"myDate": "2016-09-30", "categ": "CAT 1", "val": 3.1}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItem {
    #[serde(rename = "myDate")]
    pub my_date: String,
    pub categ: String,
    pub val: f64,
}

/// Dates are read as UTC midnight, independent of the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarAdapter;

impl SourceAdapter for CalendarAdapter {
    type Raw = CalendarItem;
    const SOURCE: SourceId = SourceId::B;

    fn adapt(&self, raw: CalendarItem) -> Result<CanonicalRecord, AdaptError> {
        let timestamp = parse_calendar_date(&raw.my_date)?;
        let category = canonical_category(&raw.categ)
            .ok_or_else(|| AdaptError::MissingCategory(raw.categ))?;
        Ok(CanonicalRecord::new(timestamp, category, raw.val))
    }
}
