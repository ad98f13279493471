//! Synchronous client for the **disease.sh COVID-19 API (v3)**.
//!
//! Three endpoints are used:
//! - `/all` for the global snapshot
//! - `/countries/{country}` for one country's snapshot
//! - `/historical/{country}?lastdays={days}` for a trailing window of cumulative cases
//!
//! ### Notes
//! - Exactly one GET per call. There is no retry; a failed request is returned as a
//!   [`FetchError`] and the caller decides what to do with it.
//! - Unknown country names come back from the API as HTTP 404.
//! - Timeouts come from [`Config`] (30s total, 10s connect by default).
//!
//! Typical usage:
//! ```no_run
//! # use covid_tracker::{Client, Config};
//! let client = Client::new(&Config::default())?;
//! let world = client.global_stats()?;
//! let usa = client.historical_stats("usa", Some(14))?;
//! println!("{} cases worldwide, {} days for {}", world.cases, usa.len(), usa.country);
//! # Ok::<(), covid_tracker::FetchError>(())
//! ```

use crate::config::{Config, DEFAULT_DAYS};
use crate::error::FetchError;
use crate::models::{HistoricalSeries, Snapshot};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Keep -, _, ., ~ readable in path segments; encode everything else (spaces, slashes, ...)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SEGMENT).to_string()
}

impl Client {
    /// Build a client from `config`: base URL, timeouts, redirect cap and user agent.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(5))
            .user_agent(concat!("covid_tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Absolute URL for an endpoint path such as `/all`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one GET against `path` and parse the body as JSON.
    ///
    /// ### Errors
    /// - `Transport`: the request never produced a status (DNS, refused, timeout)
    /// - `Status`: any non-2xx answer
    /// - `Decode`: the body is not valid JSON
    pub fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url(path);
        debug!("GET {url}");
        let result = self.get_json(url);
        // The session layer prints the user-facing line; keep this below the default filter.
        if let Err(e) = &result {
            debug!("{e}");
        }
        result
    }

    fn get_json(&self, url: String) -> Result<Value, FetchError> {
        let resp = match self.http.get(&url).send() {
            Ok(r) => r,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        let body = match resp.text() {
            Ok(b) => b,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url,
            reason: e.to_string(),
        })
    }

    /// Worldwide snapshot from `/all`.
    pub fn global_stats(&self) -> Result<Snapshot, FetchError> {
        let path = "/all";
        let v = self.fetch_json(path)?;
        Snapshot::from_json(&v).map_err(|e| e.with_url(&self.url(path)))
    }

    /// Snapshot for one country from `/countries/{country}`.
    ///
    /// The name is passed through as-is apart from percent-encoding; the API
    /// matches it case-insensitively and also accepts ISO2/ISO3 codes.
    pub fn country_stats(&self, country: &str) -> Result<Snapshot, FetchError> {
        let path = format!("/countries/{}", enc_segment(country));
        let v = self.fetch_json(&path)?;
        Snapshot::from_json(&v).map_err(|e| e.with_url(&self.url(&path)))
    }

    /// Trailing window of cumulative cases from `/historical/{country}?lastdays={days}`.
    ///
    /// `days` defaults to [`DEFAULT_DAYS`] and is sent unchanged; clamping is the
    /// caller's policy (see [`crate::config::clamp_days`]).
    pub fn historical_stats(
        &self,
        country: &str,
        days: Option<u32>,
    ) -> Result<HistoricalSeries, FetchError> {
        let days = days.unwrap_or(DEFAULT_DAYS);
        let path = format!("/historical/{}?lastdays={}", enc_segment(country), days);
        let v = self.fetch_json(&path)?;
        HistoricalSeries::from_json(&v, country.trim()).map_err(|e| e.with_url(&self.url(&path)))
    }
}
