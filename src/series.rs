//! Turn a historical series into chart input.

use crate::models::HistoricalSeries;
use chrono::NaiveDate;

/// One plotted point: calendar date and cumulative cases.
pub type SeriesPoint = (NaiveDate, u64);

/// Points in ascending calendar order, one per day in the series.
///
/// Ordering comes from the parsed dates only. Source order and key spelling
/// (`"10/1/24"` sorts before `"9/30/24"` as a string) have no effect.
pub fn chart_points(series: &HistoricalSeries) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = series.days.iter().map(|d| (d.date, d.cases)).collect();
    points.sort_by_key(|(date, _)| *date);
    points
}

/// Chart caption, e.g. `COVID-19 Cases in USA (Last 30 Days)`.
pub fn chart_title(country: &str, days: u32) -> String {
    format!(
        "COVID-19 Cases in {} (Last {} Days)",
        country.trim().to_uppercase(),
        days
    )
}
