//! Presentation adapter — turns grouped series into chart-ready data.
//!
//! Drawing is left to the consumer. This module only shapes the data: one
//! line series per category (raw points, no subtotal) and one pie slice per
//! category holding its share of the grand total in percent.

use crate::config::ChartOptions;
use crate::domain::GroupedSeries;
use serde::{Deserialize, Serialize};

/// One line of the line chart. Points serialize as `[timestamp_ms, value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub data: Vec<(i64, f64)>,
}

/// One slice of the proportional chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub percentage: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub line: Vec<LineSeries>,
    pub pie: Vec<PieSlice>,
}

/// Line series per category, in category order.
pub fn line_series(grouped: &GroupedSeries) -> Vec<LineSeries> {
    grouped
        .categories
        .iter()
        .map(|(name, cat)| LineSeries {
            name: name.clone(),
            data: cat.points.iter().map(|p| (p.timestamp, p.value)).collect(),
        })
        .collect()
}

/// Subtotal / grand total in percent for each category.
///
/// A zero grand total yields 0% everywhere instead of NaN.
pub fn pie_slices(grouped: &GroupedSeries, highlight: Option<&str>) -> Vec<PieSlice> {
    grouped
        .categories
        .iter()
        .map(|(name, cat)| PieSlice {
            name: name.clone(),
            percentage: share_percent(cat.subtotal, grouped.grand_total),
            highlighted: highlight == Some(name.as_str()),
        })
        .collect()
}

pub fn chart_payload(grouped: &GroupedSeries, options: &ChartOptions) -> ChartPayload {
    ChartPayload {
        line: line_series(grouped),
        pie: pie_slices(grouped, options.highlight.as_deref()),
    }
}

fn share_percent(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}
