//! # Quote Entity
//!
//! One priced service offering from one carrier.
//!
//! # Examples
//!
//! ```
//! use ship_rates::domain::entities::quote::{DeliveryWindow, Quote};
//! use ship_rates::domain::value_objects::{CarrierId, Currency, Money, ServiceId};
//! use rust_decimal::Decimal;
//!
//! let quote = Quote::new(
//!     CarrierId::new("fedex"),
//!     ServiceId::new("express"),
//!     "FedEx Express",
//!     Money::new(Decimal::new(18950, 2), Currency::mxn()).unwrap(),
//! )
//! .with_delivery_window(DeliveryWindow::business_days(1));
//!
//! assert_eq!(quote.total_price().amount(), Decimal::new(18950, 2));
//! ```

use crate::domain::value_objects::{CarrierId, Money, ServiceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated delivery time as reported by the carrier.
///
/// Carriers report any combination of a free-text estimate, a business-day
/// count and a calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryWindow {
    /// Carrier's own wording, e.g. `"2-3 días"`.
    pub description: Option<String>,
    /// Business days until delivery.
    pub business_days: Option<u32>,
    /// Expected delivery date.
    pub date: Option<NaiveDate>,
}

impl DeliveryWindow {
    /// Creates a window from a business-day count.
    #[must_use]
    pub fn business_days(days: u32) -> Self {
        Self {
            business_days: Some(days),
            ..Self::default()
        }
    }

    /// Returns true if the carrier reported nothing usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.business_days.is_none() && self.date.is_none()
    }
}

/// A canonical rate quote.
///
/// # Invariants
///
/// - `total_price` is non-negative (enforced by [`Money`])
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    carrier_id: CarrierId,
    service_id: ServiceId,
    service_description: String,
    total_price: Money,
    delivery_window: Option<DeliveryWindow>,
}

impl Quote {
    /// Creates a quote without a delivery estimate.
    #[must_use]
    pub fn new(
        carrier_id: CarrierId,
        service_id: ServiceId,
        service_description: impl Into<String>,
        total_price: Money,
    ) -> Self {
        Self {
            carrier_id,
            service_id,
            service_description: service_description.into(),
            total_price,
            delivery_window: None,
        }
    }

    /// Attaches a delivery estimate; empty windows are dropped.
    #[must_use]
    pub fn with_delivery_window(mut self, window: DeliveryWindow) -> Self {
        self.delivery_window = (!window.is_empty()).then_some(window);
        self
    }

    /// Returns the carrier that issued this quote.
    #[inline]
    #[must_use]
    pub fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    /// Returns the service tier.
    #[inline]
    #[must_use]
    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    /// Returns the human-readable service name.
    #[inline]
    #[must_use]
    pub fn service_description(&self) -> &str {
        &self.service_description
    }

    /// Returns the total price.
    #[inline]
    #[must_use]
    pub fn total_price(&self) -> &Money {
        &self.total_price
    }

    /// Returns the delivery estimate, if the carrier gave one.
    #[inline]
    #[must_use]
    pub fn delivery_window(&self) -> Option<&DeliveryWindow> {
        self.delivery_window.as_ref()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({}/{} @ {})",
            self.carrier_id, self.service_id, self.total_price
        )
    }
}
