//! covid_tracker
//!
//! A small Rust library for retrieving COVID-19 statistics from the public
//! [disease.sh](https://disease.sh) API, printing them as readable reports,
//! and charting cumulative cases over time. Pairs with the `covid-tracker` CLI.
//!
//! ### Features
//! - Global and per-country snapshots with thousands-separated output
//! - Historical windows (up to 30 days) sorted by calendar date
//! - SVG/PNG line charts of cumulative cases
//! - An interactive menu, or one-shot subcommands for scripts
//!
//! ### Example
//! ```no_run
//! use covid_tracker::{Client, Config};
//! use covid_tracker::series::{chart_points, chart_title};
//!
//! let client = Client::new(&Config::default())?;
//! let series = client.historical_stats("germany", Some(14))?;
//! let points = chart_points(&series);
//! covid_tracker::viz::plot_series(&points, &chart_title("germany", 14), "de.svg", 1200, 600, "en")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod report;
pub mod series;
pub mod tracker;
pub mod viz;

pub use api::Client;
pub use config::{Config, clamp_days};
pub use error::FetchError;
pub use models::{DailyCount, HistoricalSeries, Snapshot};
pub use tracker::Tracker;
