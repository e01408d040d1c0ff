//! Unified error types for comic-proxy.
//!
//! The variants follow the three failure kinds callers need to tell apart:
//! bad input (never reaches the network), authoritative absence upstream,
//! and every other upstream or transport problem.

/// Unified error type for comic retrieval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Comic identifier is not a positive integer.
    #[error("INVALID_ID: {0}")]
    InvalidId(String),

    /// Other caller-supplied parameters out of range (page, limit).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Upstream reports that the comic does not exist.
    #[error("NOT_FOUND: comic {0} not found")]
    NotFound(u64),

    /// Network error, unexpected status, or malformed upstream body.
    #[error("UPSTREAM_ERROR: failed to {operation}: {message}")]
    Upstream { operation: String, message: String },
}

impl Error {
    /// Build an upstream error tagged with the operation that failed.
    pub fn upstream(operation: impl Into<String>, message: impl ToString) -> Self {
        Error::Upstream { operation: operation.into(), message: message.to_string() }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidId(_) => "INVALID_ID",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }

    /// True for errors caused by the caller rather than upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidId(_) | Error::InvalidInput(_))
    }
}
