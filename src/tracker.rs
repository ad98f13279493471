//! Session layer between the client and the console.
//!
//! Every fetch failure is turned into one printed line and an absent result,
//! so a bad country name or a dropped connection never ends the session.

use crate::api::Client;
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{HistoricalSeries, Snapshot};
use crate::report::{SnapshotScope, map_locale, render_snapshot};
use crate::series::{chart_points, chart_title};
use crate::viz;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Tracker {
    client: Client,
    config: Config,
}

/// Print `Error fetching {what}: {cause}` and drop the error.
fn collapse<T, W: Write>(
    out: &mut W,
    what: &str,
    result: Result<T, FetchError>,
) -> io::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            writeln!(out, "Error fetching {what}: {e}")?;
            Ok(None)
        }
    }
}

impl Tracker {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let client = Client::new(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Global snapshot, or `None` after reporting the failure to `out`.
    pub fn global<W: Write>(&self, out: &mut W) -> io::Result<Option<Snapshot>> {
        collapse(out, "global data", self.client.global_stats())
    }

    pub fn country<W: Write>(&self, out: &mut W, country: &str) -> io::Result<Option<Snapshot>> {
        collapse(
            out,
            &format!("data for {}", country.trim()),
            self.client.country_stats(country),
        )
    }

    pub fn historical<W: Write>(
        &self,
        out: &mut W,
        country: &str,
        days: u32,
    ) -> io::Result<Option<HistoricalSeries>> {
        collapse(
            out,
            &format!("historical data for {}", country.trim()),
            self.client.historical_stats(country, Some(days)),
        )
    }

    /// Fetch and print the global report.
    pub fn show_global<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = self.global(out)?;
        let locale = map_locale(&self.config.locale);
        render_snapshot(out, snapshot.as_ref(), &SnapshotScope::Global, locale)
    }

    /// Fetch and print one country's report.
    pub fn show_country<W: Write>(&self, out: &mut W, country: &str) -> io::Result<()> {
        let snapshot = self.country(out, country)?;
        let locale = map_locale(&self.config.locale);
        let scope = SnapshotScope::Country(country.to_string());
        render_snapshot(out, snapshot.as_ref(), &scope, locale)
    }

    /// Fetch a trailing window and draw it to the configured chart location.
    ///
    /// With [`Config::open_charts`] set the written file is also opened in the default viewer.
    pub fn plot_history<W: Write>(
        &self,
        out: &mut W,
        country: &str,
        days: u32,
    ) -> io::Result<Option<PathBuf>> {
        let path = self.config.chart_path(country, days);
        self.plot_history_to(out, country, days, path)
    }

    /// Like [`Tracker::plot_history`] with an explicit output path.
    ///
    /// Returns the written path, or `None` when nothing could be drawn.
    pub fn plot_history_to<W: Write>(
        &self,
        out: &mut W,
        country: &str,
        days: u32,
        path: PathBuf,
    ) -> io::Result<Option<PathBuf>> {
        let Some(series) = self.historical(out, country, days)? else {
            return Ok(None);
        };
        if series.is_empty() {
            writeln!(out, "No historical cases returned for {}.", country.trim())?;
            return Ok(None);
        }

        let points = chart_points(&series);
        let title = chart_title(country, days);
        let cfg = &self.config;
        match viz::plot_series_with_font(
            &points,
            &title,
            &path,
            cfg.chart_width,
            cfg.chart_height,
            &cfg.locale,
            cfg.font.as_deref(),
        ) {
            Ok(()) => {
                writeln!(out, "\n{title}: {} days plotted", points.len())?;
                writeln!(out, "Chart written to {}", path.display())?;
                if cfg.open_charts {
                    if let Err(e) = viz::open_in_viewer(&path) {
                        writeln!(out, "Could not open chart viewer: {e:#}")?;
                    }
                }
                Ok(Some(path))
            }
            Err(e) => {
                writeln!(out, "Error plotting historical data for {}: {e:#}", country.trim())?;
                Ok(None)
            }
        }
    }
}
