//! Utility functions for the chart: label measurement, day-axis mapping, value range.

use crate::report::format_count;
use crate::series::SeriesPoint;
use chrono::{Duration, NaiveDate};
use num_format::Locale;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the locale-formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = (ymin + (ymax - ymin) * t).round();
        let s = format_count(v, locale);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // Room for tick marks and the rotated axis title.
    max_px.saturating_add(40).clamp(64, 180)
}

/// Map dated points onto an `f64` day axis starting at the first date.
pub fn to_day_axis(points: &[SeriesPoint]) -> Option<(NaiveDate, Vec<(f64, f64)>)> {
    let first = points.first()?.0;
    let xy = points
        .iter()
        .map(|(d, v)| ((*d - first).num_days() as f64, *v as f64))
        .collect();
    Some((first, xy))
}

/// Inverse of [`to_day_axis`] for tick labels.
pub fn day_label(first: NaiveDate, x: f64) -> String {
    (first + Duration::days(x.round() as i64))
        .format("%Y-%m-%d")
        .to_string()
}

/// Inclusive (min, max) with padding so flat or single-point series still get a visible range.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        return ((lo - 1.0).max(0.0), hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    ((lo - pad).max(0.0), hi + pad)
}
