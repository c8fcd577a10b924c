//! Domain-level errors
//!
//! Every component that can fail returns [`ApiError`]. The status code is
//! advisory and loosely follows HTTP semantics; callers classify failures by
//! matching on [`ApiError::kind`] instead of on the concrete error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status used for failures that never produced an HTTP response
pub const STATUS_TRANSPORT: u16 = 0;

/// Status used for rejected input
pub const STATUS_INVALID_INPUT: u16 = 400;

/// Status used for unknown addresses and ungridded points
pub const STATUS_NOT_FOUND: u16 = 404;

/// Status used for upstream responses missing expected fields
pub const STATUS_INVALID_RESPONSE: u16 = 500;

/// The single error shape crossing every component boundary
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

/// Coarse classification of an [`ApiError`] derived from its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Address or coordinates rejected before any network call (400)
    InvalidInput,
    /// No geocoding match or no weather grid for the point (404)
    NotFound,
    /// Upstream answered with a non-success status
    Upstream,
    /// Network-level failure, timeout or undecodable body (0)
    Transport,
    /// No status attached
    Unknown,
}

impl ApiError {
    /// Create an error with an explicit, optional status
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Input failed validation (400)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, Some(STATUS_INVALID_INPUT))
    }

    /// Nothing matched the request (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, Some(STATUS_NOT_FOUND))
    }

    /// Upstream returned a non-success status, passed through unchanged
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(message, Some(status))
    }

    /// Upstream succeeded but the payload lacks an expected field (500)
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(message, Some(STATUS_INVALID_RESPONSE))
    }

    /// The request never produced a usable response (0)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message, Some(STATUS_TRANSPORT))
    }

    /// The human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The advisory status code, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Classify the error by status range
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self.status {
            None => ErrorKind::Unknown,
            Some(STATUS_TRANSPORT) => ErrorKind::Transport,
            Some(STATUS_INVALID_INPUT) => ErrorKind::InvalidInput,
            Some(STATUS_NOT_FOUND) => ErrorKind::NotFound,
            Some(_) => ErrorKind::Upstream,
        }
    }

    /// True for 4xx statuses
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status, Some(400..=499))
    }

    /// True for 5xx statuses
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status, Some(500..=599))
    }
}
