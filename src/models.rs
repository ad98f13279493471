use crate::error::FetchError;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Point-in-time aggregate statistics for one scope (the world or a country).
///
/// Counts arrive as integers; the per-million ratios may be fractional, so
/// everything is held as `f64` and formatted on output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Display name reported by the API (country queries only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Last update as epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    pub cases: f64,
    pub deaths: f64,
    pub recovered: f64,
    pub active: f64,
    pub critical: f64,
    pub cases_per_one_million: f64,
    pub deaths_per_one_million: f64,
}

impl Snapshot {
    /// Decode a `/all` or `/countries/{name}` body.
    ///
    /// Every statistic must be present and numeric; the first one that is not
    /// is reported as `FetchError::MissingField`.
    pub fn from_json(v: &Value) -> Result<Self, FetchError> {
        let obj = v.as_object().ok_or_else(|| decode_err("expected a JSON object"))?;
        Ok(Self {
            country: obj.get("country").and_then(Value::as_str).map(str::to_string),
            updated: obj.get("updated").and_then(Value::as_i64),
            cases: number(obj, "cases")?,
            deaths: number(obj, "deaths")?,
            recovered: number(obj, "recovered")?,
            active: number(obj, "active")?,
            critical: number(obj, "critical")?,
            cases_per_one_million: number(obj, "casesPerOneMillion")?,
            deaths_per_one_million: number(obj, "deathsPerOneMillion")?,
        })
    }
}

fn number(obj: &Map<String, Value>, field: &str) -> Result<f64, FetchError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| FetchError::MissingField {
            url: String::new(),
            field: field.to_string(),
        })
}

fn decode_err(reason: impl Into<String>) -> FetchError {
    FetchError::Decode {
        url: String::new(),
        reason: reason.into(),
    }
}

/// One day of a historical series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    /// Key exactly as the API sent it, e.g. `"3/21/24"`.
    pub label: String,
    /// Cumulative confirmed cases on `date`.
    pub cases: u64,
}

/// Cumulative case counts over a trailing window, in the order the API sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalSeries {
    pub country: String,
    pub days: Vec<DailyCount>,
}

impl HistoricalSeries {
    /// Decode a `/historical/{country}` body.
    ///
    /// Country queries wrap the data as `{"country": .., "timeline": {"cases": {..}}}`;
    /// `/historical/all` returns the timeline object directly. Both are accepted.
    /// `requested` labels the series when the body carries no country name.
    pub fn from_json(v: &Value, requested: &str) -> Result<Self, FetchError> {
        let obj = v.as_object().ok_or_else(|| decode_err("expected a JSON object"))?;
        let timeline = match obj.get("timeline") {
            Some(t) => t,
            None => v,
        };
        let cases = timeline
            .get("cases")
            .and_then(Value::as_object)
            .ok_or_else(|| FetchError::MissingField {
                url: String::new(),
                field: "timeline.cases".into(),
            })?;

        let country = obj
            .get("country")
            .and_then(Value::as_str)
            .unwrap_or(requested)
            .to_string();

        let entries = cases.iter().map(|(k, v)| -> Result<(String, u64), FetchError> {
            let n = v
                .as_u64()
                .ok_or_else(|| decode_err(format!("case count for {k} is not a non-negative integer")))?;
            Ok((k.clone(), n))
        });
        Self::from_entries(country, entries.collect::<Result<Vec<_>, FetchError>>()?)
    }

    /// Build a series from raw `(date key, count)` pairs, parsing every key.
    pub fn from_entries<I>(country: impl Into<String>, entries: I) -> Result<Self, FetchError>
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let days = entries
            .into_iter()
            .map(|(label, cases)| -> Result<DailyCount, FetchError> {
                let date = parse_day(&label)
                    .ok_or_else(|| decode_err(format!("unrecognised date key `{label}`")))?;
                Ok(DailyCount { date, label, cases })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;
        Ok(Self {
            country: country.into(),
            days,
        })
    }

    /// Copy with the days in ascending calendar order.
    pub fn sorted_by_date(&self) -> Self {
        let mut days = self.days.clone();
        days.sort_by_key(|d| d.date);
        Self {
            country: self.country.clone(),
            days,
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Parse the API's `M/D/YY` keys (not zero-padded); four-digit years are accepted too.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%m/%d/%y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unpadded_keys() {
        assert_eq!(parse_day("1/2/24"), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(parse_day("12/31/23"), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(parse_day("3/9/2021"), NaiveDate::from_ymd_opt(2021, 3, 9));
        assert_eq!(parse_day("13/1/24"), None);
        assert_eq!(parse_day("yesterday"), None);
    }
}
