//! # Identifiers
//!
//! String- and UUID-based identifier types.
//!
//! - [`CarrierId`]: a shipping carrier known to the configuration
//! - [`ServiceId`]: a carrier's service tier (e.g. `express`)
//! - [`AggregationId`]: correlates the log lines of one aggregation

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a shipping carrier.
///
/// Carrier identifiers come from configuration, not runtime discovery.
/// Comparison is exact; the configured spelling is the canonical one.
///
/// # Examples
///
/// ```
/// use ship_rates::domain::value_objects::CarrierId;
///
/// let fedex = CarrierId::new("fedex");
/// assert_eq!(fedex.as_str(), "fedex");
/// assert!(fedex.matches("FedEx"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierId(String);

impl CarrierId {
    /// Creates a carrier identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a carrier identifier, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if `id` is empty or whitespace.
    pub fn parse(id: &str) -> DomainResult<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "carrier id must not be blank".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `other` names this carrier, ignoring ASCII case.
    ///
    /// Carriers echo their own name back in rate responses with
    /// inconsistent casing.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarrierId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a carrier service tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a service identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationId(Uuid);

impl AggregationId {
    /// Creates a new random aggregation ID.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AggregationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn carrier_id_parse_trims() {
        let id = CarrierId::parse("  dhl ").unwrap();
        assert_eq!(id.as_str(), "dhl");
    }

    #[test]
    fn carrier_id_parse_rejects_blank() {
        assert!(CarrierId::parse("   ").is_err());
    }

    #[test]
    fn carrier_id_matches_ignores_case() {
        let id = CarrierId::new("paquetexpress");
        assert!(id.matches("PaquetExpress"));
        assert!(!id.matches("estafeta"));
    }

    #[test]
    fn carrier_id_serializes_as_string() {
        let json = serde_json::to_string(&CarrierId::new("ups")).unwrap();
        assert_eq!(json, "\"ups\"");
    }

    #[test]
    fn aggregation_ids_are_unique() {
        assert_ne!(AggregationId::new_v4(), AggregationId::new_v4());
    }
}
