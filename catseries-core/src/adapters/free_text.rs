//! Source C: one free-text `raw` field embedding both the date and the category.
//!
//! The date is the first `YYYY-MM-DD` token (years 1600..=9999, leap years
//! honoured) that forms a real calendar date. The category is the first
//! `#...#` span with the markers stripped.

use super::{canonical_category, midnight_utc_millis, AdaptError, SourceAdapter};
use crate::domain::{CanonicalRecord, SourceId};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const MIN_YEAR: i32 = 1600;

/// Raw item from source C: `{"raw": "9OHbc9O1 2016-09-30 #CAT 2# 8Cw0zI", "val": 4.2}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeTextItem {
    pub raw: String,
    pub val: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTextAdapter;

impl SourceAdapter for FreeTextAdapter {
    type Raw = FreeTextItem;
    const SOURCE: SourceId = SourceId::C;

    fn adapt(&self, raw: FreeTextItem) -> Result<CanonicalRecord, AdaptError> {
        let date = extract_date(&raw.raw)
            .ok_or_else(|| AdaptError::MissingDate(raw.raw.clone()))?;
        let category = extract_category(&raw.raw)
            .ok_or_else(|| AdaptError::MissingCategory(raw.raw.clone()))?;
        Ok(CanonicalRecord::new(midnight_utc_millis(date), category, raw.val))
    }
}

/// First embedded `YYYY-MM-DD` token that is a valid calendar date.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    date_pattern().captures_iter(text).find_map(|caps| {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if year < MIN_YEAR {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// First `#...#` span, markers stripped, in canonical spelling.
pub fn extract_category(text: &str) -> Option<String> {
    let caps = category_span().captures(text)?;
    canonical_category(&caps[1])
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{2})\b")
            .expect("date pattern is a valid regex")
    })
}

fn category_span() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#([^#]*)#")
            .expect("category pattern is a valid regex")
    })
}
