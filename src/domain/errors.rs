//! # Domain Errors
//!
//! Error types raised while constructing domain values and validating
//! shipment requests.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::errors::ValidationError;
//!
//! let err = ValidationError::unknown_region("destination", "Atlantis");
//! assert!(err.to_string().contains("Atlantis"));
//! ```

use thiserror::Error;

/// Error raised when a domain value cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Price is negative or otherwise unusable.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Currency code is not a three-letter ISO code.
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    /// Region code is not a short uppercase code.
    #[error("invalid region code: {0}")]
    InvalidRegionCode(String),

    /// Identifier is empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type for domain value construction.
pub type DomainResult<T> = Result<T, DomainError>;

/// Request-level validation failure.
///
/// Raised by the aggregation facade before any carrier is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A region name is not in the lookup table.
    #[error("unknown {field} region: {name:?}")]
    UnknownRegion {
        /// Which address the region belongs to (`origin` or `destination`).
        field: &'static str,
        /// The region name as supplied.
        name: String,
    },

    /// The request carries no packages.
    #[error("shipment has no packages")]
    NoPackages,

    /// A package failed structural validation.
    #[error("package {index} is invalid: {reason}")]
    InvalidPackage {
        /// Zero-based position of the package in the request.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The requested number of quotes is zero.
    #[error("top-k must be at least 1")]
    InvalidTopK,

    /// No carriers were requested.
    #[error("carrier set is empty")]
    NoCarriers,
}

impl ValidationError {
    /// Creates an unknown region error.
    #[must_use]
    pub fn unknown_region(field: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownRegion {
            field,
            name: name.into(),
        }
    }

    /// Creates an invalid package error.
    #[must_use]
    pub fn invalid_package(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPackage {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_display() {
        let err = ValidationError::unknown_region("destination", "Narnia");
        assert_eq!(err.to_string(), "unknown destination region: \"Narnia\"");
    }

    #[test]
    fn invalid_package_display() {
        let err = ValidationError::invalid_package(2, "weight must be positive");
        assert_eq!(
            err.to_string(),
            "package 2 is invalid: weight must be positive"
        );
    }

    #[test]
    fn domain_error_display() {
        let err = DomainError::InvalidCurrency("MX".to_string());
        assert_eq!(err.to_string(), "invalid currency: MX");
    }
}
