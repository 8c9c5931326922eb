//! Error types for store operations.

use thiserror::Error;

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A failure while talking to the record store.
///
/// Transport problems are deliberately not broken down further (timeout
/// vs auth vs rate limit): the upstream payload travels along verbatim
/// for the caller to surface, and nothing here is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("request to the record store failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("record store returned HTTP {status}")]
    Upstream {
        status: u16,
        /// The upstream error body, when it was readable JSON.
        payload: Option<serde_json::Value>,
    },

    /// The store answered 2xx but the body did not parse.
    #[error("unreadable response from the record store: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Creates an upstream error from a status and optional body.
    pub fn upstream(status: u16, payload: Option<serde_json::Value>) -> Self {
        Self::Upstream { status, payload }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// The upstream payload, if any, for pass-through to the caller.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Upstream { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// The upstream HTTP status, if this error carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
