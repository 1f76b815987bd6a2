//! # Carrier Errors
//!
//! Error types for carrier HTTP calls.
//!
//! [`CarrierError`] is internal to the adapter boundary: every variant
//! collapses into a [`FailureReason`] before an outcome leaves the adapter.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::entities::FailureReason;
//! use ship_rates::infrastructure::carriers::error::CarrierError;
//!
//! let reason: FailureReason = CarrierError::http_status(503, "maintenance").into();
//! assert_eq!(reason, FailureReason::http_error(503));
//! ```

use crate::domain::entities::FailureReason;
use thiserror::Error;

/// Error type for carrier adapter operations.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Non-2xx HTTP status.
    #[error("carrier http error ({status}): {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// Payload could not be parsed or lacked required fields.
    #[error("carrier protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Client setup failed.
    #[error("carrier internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

const MAX_BODY_CHARS: usize = 256;

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error, truncating long bodies.
    #[must_use]
    pub fn http_status(status: u16, body: &str) -> Self {
        Self::HttpStatus {
            status,
            body: body.chars().take(MAX_BODY_CHARS).collect(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<CarrierError> for FailureReason {
    fn from(error: CarrierError) -> Self {
        match error {
            CarrierError::Timeout { .. } => FailureReason::Timeout,
            CarrierError::Connection { message } | CarrierError::InternalError { message } => {
                FailureReason::transport(message)
            }
            CarrierError::HttpStatus { status, .. } => FailureReason::http_error(status),
            CarrierError::ProtocolError { message } => FailureReason::malformed(message),
        }
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_timeout() {
        let reason: FailureReason = CarrierError::timeout("slow").into();
        assert_eq!(reason, FailureReason::Timeout);
    }

    #[test]
    fn connection_maps_to_transport() {
        let reason: FailureReason = CarrierError::connection("refused").into();
        assert_eq!(reason, FailureReason::transport("refused"));
    }

    #[test]
    fn protocol_maps_to_malformed() {
        let reason: FailureReason = CarrierError::protocol_error("missing data").into();
        assert_eq!(reason.kind(), "malformed_response");
    }

    #[test]
    fn http_status_truncates_body() {
        let body = "x".repeat(1000);
        match CarrierError::http_status(500, &body) {
            CarrierError::HttpStatus { body, .. } => assert_eq!(body.len(), MAX_BODY_CHARS),
            other => unreachable!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn display_format() {
        let error = CarrierError::http_status(401, "bad token");
        assert_eq!(error.to_string(), "carrier http error (401): bad token");
    }
}
