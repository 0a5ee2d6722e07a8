use thiserror::Error;

/// The one way a weather fetch can fail.
///
/// Transport errors, non-success statuses and response bodies that do not match
/// the expected shape are all reported through this type.
#[derive(Debug, Error)]
#[error("weather fetch failed: {reason}")]
pub struct FetchFailed {
    reason: String,
}

impl FetchFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for FetchFailed {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("transport error: {err}"))
    }
}

impl From<serde_json::Error> for FetchFailed {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed response body: {err}"))
    }
}
