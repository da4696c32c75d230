//! Source adapters — one per upstream source, each turning a raw item into a
//! [`CanonicalRecord`].
//!
//! Every source has its own quirks (field names, date encodings, category
//! spelling). They stay inside the adapter for that source; the normalizer
//! only sees the shared [`SourceAdapter`] capability.

pub mod calendar;
pub mod free_text;
pub mod timestamped;

pub use calendar::{CalendarAdapter, CalendarItem};
pub use free_text::{FreeTextAdapter, FreeTextItem};
pub use timestamped::{TimestampedAdapter, TimestampedItem};

use crate::domain::{CanonicalRecord, SourceId};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Why a single raw item could not be adapted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdaptError {
    #[error("item does not have the expected shape: {0}")]
    Shape(String),

    #[error("no YYYY-MM-DD date found in {0:?}")]
    MissingDate(String),

    #[error("invalid calendar date {0:?}")]
    InvalidDate(String),

    #[error("no category found in {0:?}")]
    MissingCategory(String),
}

/// Shared capability: produce a canonical record from one raw item.
pub trait SourceAdapter {
    /// Typed shape of one raw item from this source.
    type Raw: DeserializeOwned;

    /// Which source this adapter handles.
    const SOURCE: SourceId;

    fn adapt(&self, raw: Self::Raw) -> Result<CanonicalRecord, AdaptError>;

    /// Decode an untyped JSON item into `Self::Raw`, then adapt it.
    fn adapt_value(&self, item: &serde_json::Value) -> Result<CanonicalRecord, AdaptError> {
        let raw = Self::Raw::deserialize(item)
            .map_err(|e| AdaptError::Shape(e.to_string()))?;
        self.adapt(raw)
    }
}

/// Canonical category spelling: upper case, `<LETTERS> <DIGITS>`.
///
/// `"cat 1"`, `"Cat_1"`, `"CAT-1"` and `"cat1"` all become `"CAT 1"`. Labels
/// without a numeric suffix are upper-cased with whitespace collapsed.
/// Returns `None` for blank labels.
pub fn canonical_category(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    if let Some(caps) = category_pattern().captures(&upper) {
        return Some(format!("{} {}", &caps[1], &caps[2]));
    }

    Some(upper.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Milliseconds since the Unix epoch for UTC midnight of `date`.
pub fn midnight_utc_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Parse a strict `YYYY-MM-DD` calendar date to UTC-midnight milliseconds.
pub fn parse_calendar_date(s: &str) -> Result<i64, AdaptError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(midnight_utc_millis)
        .map_err(|_| AdaptError::InvalidDate(s.to_string()))
}

fn category_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]+)[\s_\-.]*(\d+)$")
            .expect("category pattern is a valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_category_normalizes_case_and_delimiters() {
        assert_eq!(canonical_category("cat 1").as_deref(), Some("CAT 1"));
        assert_eq!(canonical_category("Cat_2").as_deref(), Some("CAT 2"));
        assert_eq!(canonical_category("CAT-3").as_deref(), Some("CAT 3"));
        assert_eq!(canonical_category("cat4").as_deref(), Some("CAT 4"));
        assert_eq!(canonical_category("  CAT 5 ").as_deref(), Some("CAT 5"));
    }

    #[test]
    fn canonical_category_keeps_labels_without_number() {
        assert_eq!(
            canonical_category("other  stuff").as_deref(),
            Some("OTHER STUFF")
        );
    }

    #[test]
    fn canonical_category_rejects_blank() {
        assert_eq!(canonical_category("   "), None);
        assert_eq!(canonical_category(""), None);
    }

    #[test]
    fn epoch_day_is_zero() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(midnight_utc_millis(date), 0);
        assert_eq!(parse_calendar_date("1970-01-02"), Ok(86_400_000));
    }

    #[test]
    fn parse_calendar_date_rejects_garbage() {
        assert!(matches!(
            parse_calendar_date("2016/01/02"),
            Err(AdaptError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_calendar_date("2015-02-29"),
            Err(AdaptError::InvalidDate(_))
        ));
    }
}
