//! Transport failures
//!
//! These never leave the crate. They are folded into a status-0
//! [`ApiError`] exactly once, at the client boundary.

use domain::ApiError;
use thiserror::Error;

/// Failures that happen before a usable geocoder answer exists
#[derive(Debug, Error)]
pub(crate) enum TransportError {
    /// HTTP client could not be built
    #[error("HTTP client initialization failed: {0}")]
    ClientInit(String),

    /// Direct request never produced a response
    #[error("{0}")]
    Request(String),

    /// Response body was not the expected JSON document
    #[error("Invalid geocoder response: {0}")]
    Decode(String),

    /// Fallback request never produced a response
    #[error("JSONP request failed - network error")]
    FallbackNetwork(String),

    /// Fallback request returned a non-success status
    #[error("JSONP request failed - HTTP {0}")]
    FallbackStatus(u16),

    /// Fallback body did not invoke the registered callback
    #[error("JSONP response did not invoke the expected callback")]
    FallbackPayload,

    /// Fallback did not complete in time
    #[error("JSONP request timed out")]
    FallbackTimeout,
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::transport(format!(
            "Failed to geocode address: {err}. Please check your internet connection and try again."
        ))
    }
}
