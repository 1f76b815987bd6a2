//! # Application Errors
//!
//! Error types returned by the aggregation facade.
//!
//! # Error Hierarchy
//!
//! ```text
//! AggregationError
//! ├── Validation(ValidationError)  - Request rejected before any carrier call
//! ├── AllFailed { failures }       - Every carrier failed, one reason each
//! └── Internal(String)             - Coordinator fault (e.g. adapter panic)
//! ```
//!
//! A run that produced at least one quote is never `AllFailed`. When it is,
//! `failures` holds one entry per queried carrier; a carrier that answered
//! with an empty rate list is reported as a malformed response.
//!
//! # Examples
//!
//! ```
//! use ship_rates::application::error::AggregationError;
//! use ship_rates::domain::errors::ValidationError;
//!
//! let err: AggregationError = ValidationError::NoPackages.into();
//! assert!(err.is_validation());
//! ```

use crate::domain::entities::CarrierFailure;
use crate::domain::errors::ValidationError;
use thiserror::Error;

/// Failure of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// The request was structurally invalid or named an unknown region.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No carrier produced a usable response.
    #[error("all {} carriers failed", failures.len())]
    AllFailed {
        /// One failure per queried carrier, in request order.
        failures: Vec<CarrierFailure>,
    },

    /// The coordinator itself failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AggregationError {
    /// Creates an all-failed error.
    #[must_use]
    pub fn all_failed(failures: Vec<CarrierFailure>) -> Self {
        Self::AllFailed { failures }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the request was rejected before dispatch.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if every carrier failed.
    #[must_use]
    pub fn is_all_failed(&self) -> bool {
        matches!(self, Self::AllFailed { .. })
    }

    /// Returns the per-carrier failures of an all-failed run.
    #[must_use]
    pub fn failures(&self) -> &[CarrierFailure] {
        match self {
            Self::AllFailed { failures } => failures,
            _ => &[],
        }
    }
}
