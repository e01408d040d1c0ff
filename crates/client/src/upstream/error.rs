//! Upstream fetcher error types.

use std::sync::Arc;

/// Errors from the upstream comic API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream reports that the issue does not exist (HTTP 404).
    #[error("comic {0} not found upstream")]
    NotFound(u64),

    /// Any other non-success HTTP response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body is not a comic record.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configured base URL cannot be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Network(Arc::new(err)) }
    }
}
