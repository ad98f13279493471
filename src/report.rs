//! Console reports for snapshots.

use crate::models::Snapshot;
use num_format::{Locale, ToFormattedString};
use std::io::{self, Write};

/// Which scope a snapshot describes; decides header and field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotScope {
    Global,
    /// Country name as the user typed it.
    Country(String),
}

impl SnapshotScope {
    pub fn header(&self) -> String {
        match self {
            SnapshotScope::Global => "--- GLOBAL COVID-19 STATISTICS ---".to_string(),
            SnapshotScope::Country(name) => {
                format!("--- COVID-19 STATISTICS FOR {} ---", name.trim().to_uppercase())
            }
        }
    }
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Format with thousands separators: `1000000.0` -> `1,000,000`, `12500.5` -> `12,500.5`.
///
/// Whole numbers print without a fractional part; other values keep the
/// shortest digits that round-trip.
pub fn format_count(v: f64, locale: &Locale) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let raw = format!("{}", v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let grouped = match int_part.parse::<u128>() {
        Ok(n) => n.to_formatted_string(locale),
        Err(_) => int_part.to_string(),
    };
    let sign = if v < 0.0 { locale.minus_sign() } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}{}{f}", locale.decimal()),
        None => format!("{sign}{grouped}"),
    }
}

/// Labelled lines in display order. Country reports stop after the critical count.
pub fn snapshot_lines(snapshot: &Snapshot, scope: &SnapshotScope, locale: &Locale) -> Vec<String> {
    let mut fields: Vec<(&str, f64)> = vec![
        ("Total Cases", snapshot.cases),
        ("Total Deaths", snapshot.deaths),
        ("Total Recovered", snapshot.recovered),
        ("Active Cases", snapshot.active),
        ("Critical Cases", snapshot.critical),
    ];
    if *scope == SnapshotScope::Global {
        fields.push(("Cases Per Million", snapshot.cases_per_one_million));
        fields.push(("Deaths Per Million", snapshot.deaths_per_one_million));
    }
    fields
        .into_iter()
        .map(|(label, v)| format!("{label}: {}", format_count(v, locale)))
        .collect()
}

/// Print a snapshot report. An absent snapshot prints nothing: the failure was
/// already reported where the fetch happened.
pub fn render_snapshot<W: Write>(
    out: &mut W,
    snapshot: Option<&Snapshot>,
    scope: &SnapshotScope,
    locale: &Locale,
) -> io::Result<()> {
    let Some(snapshot) = snapshot else {
        return Ok(());
    };
    writeln!(out, "\n{}\n", scope.header())?;
    for line in snapshot_lines(snapshot, scope, locale) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
