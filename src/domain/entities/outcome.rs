//! # Carrier Outcome
//!
//! The tagged result of asking one carrier for rates.
//!
//! Adapters decide success or failure exactly once; nothing downstream
//! re-inspects raw payloads.

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::CarrierId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a carrier produced no quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Connection, DNS, TLS or other network-level failure.
    Transport {
        /// Diagnostic detail.
        message: String,
    },
    /// The call did not complete before the deadline.
    Timeout,
    /// The carrier answered with a non-2xx status.
    HttpError {
        /// HTTP status code.
        status: u16,
    },
    /// The body was not a recognizable rate payload.
    MalformedResponse {
        /// Diagnostic detail.
        message: String,
    },
}

impl FailureReason {
    /// Creates a transport failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an HTTP status failure.
    #[must_use]
    pub fn http_error(status: u16) -> Self {
        Self::HttpError { status }
    }

    /// Creates a malformed response failure.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Returns the short category name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout => "timeout",
            Self::HttpError { .. } => "http_error",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport: {}", message),
            Self::Timeout => write!(f, "timeout"),
            Self::HttpError { status } => write!(f, "http_error({})", status),
            Self::MalformedResponse { message } => write!(f, "malformed_response: {}", message),
        }
    }
}

/// A carrier that produced no quotes, and why.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarrierFailure {
    /// The carrier.
    pub carrier_id: CarrierId,
    /// The reason.
    pub reason: FailureReason,
}

impl fmt::Display for CarrierFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.carrier_id, self.reason)
    }
}

/// Result of one adapter call.
///
/// A successful call may carry zero, one or several quotes (service tiers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarrierOutcome {
    /// The carrier answered with a rate payload.
    Quotes {
        /// The carrier.
        carrier_id: CarrierId,
        /// Quotes in the order the carrier listed them.
        quotes: Vec<Quote>,
    },
    /// The carrier could not be rated.
    Failure(CarrierFailure),
}

impl CarrierOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn quotes(carrier_id: CarrierId, quotes: Vec<Quote>) -> Self {
        Self::Quotes { carrier_id, quotes }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failure(carrier_id: CarrierId, reason: FailureReason) -> Self {
        Self::Failure(CarrierFailure { carrier_id, reason })
    }

    /// Creates a timeout outcome.
    #[must_use]
    pub fn timeout(carrier_id: CarrierId) -> Self {
        Self::failure(carrier_id, FailureReason::Timeout)
    }

    /// Returns the carrier this outcome belongs to.
    #[must_use]
    pub fn carrier_id(&self) -> &CarrierId {
        match self {
            Self::Quotes { carrier_id, .. } => carrier_id,
            Self::Failure(failure) => &failure.carrier_id,
        }
    }

    /// Returns true if the carrier answered with a rate payload.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Quotes { .. })
    }

    /// Returns the quotes; empty for failures.
    #[must_use]
    pub fn quote_list(&self) -> &[Quote] {
        match self {
            Self::Quotes { quotes, .. } => quotes,
            Self::Failure(_) => &[],
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub fn as_failure(&self) -> Option<&CarrierFailure> {
        match self {
            Self::Quotes { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Currency, Money, ServiceId};
    use rust_decimal::Decimal;

    #[test]
    fn failure_reason_kinds() {
        assert_eq!(FailureReason::transport("refused").kind(), "transport");
        assert_eq!(FailureReason::Timeout.kind(), "timeout");
        assert_eq!(FailureReason::http_error(503).kind(), "http_error");
        assert_eq!(FailureReason::malformed("x").kind(), "malformed_response");
    }

    #[test]
    fn failure_reason_serializes_tagged() {
        let json = serde_json::to_value(FailureReason::http_error(404)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "http_error", "status": 404}));
    }

    #[test]
    fn failure_display() {
        let outcome = CarrierOutcome::timeout(CarrierId::new("ivoy"));
        assert_eq!(outcome.as_failure().unwrap().to_string(), "ivoy: timeout");
        assert!(!outcome.is_success());
        assert!(outcome.quote_list().is_empty());
    }

    #[test]
    fn quotes_outcome_accessors() {
        let quote = Quote::new(
            CarrierId::new("ups"),
            ServiceId::new("saver"),
            "UPS Saver",
            Money::new(Decimal::new(250, 0), Currency::mxn()).unwrap(),
        );
        let outcome = CarrierOutcome::quotes(CarrierId::new("ups"), vec![quote]);
        assert!(outcome.is_success());
        assert_eq!(outcome.carrier_id().as_str(), "ups");
        assert_eq!(outcome.quote_list().len(), 1);
        assert!(outcome.as_failure().is_none());
    }
}
