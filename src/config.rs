//! Runtime configuration shared by the client, the reports and the chart.

use std::path::PathBuf;
use std::time::Duration;

/// Public disease.sh endpoint for COVID-19 data.
pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

/// Longest trailing window the tracker will request.
pub const MAX_DAYS: u32 = 30;

/// Window used when the caller does not ask for one.
pub const DEFAULT_DAYS: u32 = 30;

/// Clamp a user-supplied day count into `1..=MAX_DAYS`.
pub fn clamp_days(days: u32) -> u32 {
    days.clamp(1, MAX_DAYS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Directory charts are written to when no explicit path is given.
    pub out_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Number-format locale tag (`en`, `de`, ...).
    pub locale: String,
    /// TrueType font used for chart text; system locations are searched when unset.
    pub font: Option<PathBuf>,
    /// Hand each written chart to the desktop's default viewer.
    pub open_charts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            out_dir: PathBuf::from("."),
            chart_width: 1200,
            chart_height: 600,
            locale: "en".into(),
            font: None,
            open_charts: false,
        }
    }
}

impl Config {
    /// Same configuration pointed at another host (mock servers, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Default chart location for a historical query, e.g. `./covid_usa_30d.svg`.
    pub fn chart_path(&self, country: &str, days: u32) -> PathBuf {
        let slug: String = country
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let slug = if slug.is_empty() { "all".to_string() } else { slug };
        self.out_dir.join(format!("covid_{slug}_{days}d.svg"))
    }
}
