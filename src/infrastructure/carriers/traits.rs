//! # Carrier Adapter Trait
//!
//! Port definition for carrier integrations.
//!
//! Each carrier gets one [`CarrierAdapter`] implementation (or one
//! configured instance of a shared implementation). Adding a carrier means
//! registering another adapter, never branching inside shared code.
//!
//! # Examples
//!
//! ```ignore
//! use ship_rates::infrastructure::carriers::traits::CarrierAdapter;
//!
//! struct MyCarrier { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl CarrierAdapter for MyCarrier {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{CarrierOutcome, ResolvedShipment};
use crate::domain::value_objects::CarrierId;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;

/// Interface every carrier integration implements.
///
/// # Error Handling
///
/// `quote` is infallible by signature: transport errors, non-2xx statuses,
/// deadline overruns and malformed payloads are all reported as
/// [`CarrierOutcome::Failure`]. Nothing escapes the adapter boundary.
///
/// # Cancellation
///
/// Implementations must stop waiting on the network once `deadline`
/// passes. The fan-out coordinator also aborts the task at the deadline,
/// so any work after an `.await` may never run.
#[async_trait]
pub trait CarrierAdapter: Send + Sync + fmt::Debug {
    /// Returns the carrier this adapter rates for.
    fn carrier_id(&self) -> &CarrierId;

    /// Requests rates for `shipment`, giving up at `deadline`.
    async fn quote(&self, shipment: &ResolvedShipment, deadline: Instant) -> CarrierOutcome;
}

/// Lookup of configured adapters by carrier.
pub trait AdapterRegistry: Send + Sync + fmt::Debug {
    /// Returns the adapter for `carrier_id`, if one is registered.
    fn get(&self, carrier_id: &CarrierId) -> Option<Arc<dyn CarrierAdapter>>;
}
