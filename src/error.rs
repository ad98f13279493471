use thiserror::Error;

/// Everything that can go wrong while turning one API query into data.
///
/// Transport failures, non-2xx statuses and undecodable bodies are all
/// reported the same way by the session layer; the variants exist so callers
/// and tests can tell them apart without re-fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying HTTP client could not be constructed.
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect, timeout, or any other failure before a status arrived.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not the JSON shape we expected.
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// A field the report needs is absent or not a number.
    #[error("response from {url} is missing field `{field}`")]
    MissingField { url: String, field: String },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, FetchError::MissingField { .. })
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Attach the request URL to a decode-stage error raised without one.
    pub(crate) fn with_url(self, url: &str) -> Self {
        match self {
            FetchError::Decode { reason, .. } => FetchError::Decode {
                url: url.to_string(),
                reason,
            },
            FetchError::MissingField { field, .. } => FetchError::MissingField {
                url: url.to_string(),
                field,
            },
            other => other,
        }
    }
}
