//! # Domain Entities
//!
//! - [`ShipmentRequest`] / [`ResolvedShipment`]: what is being shipped
//! - [`Quote`]: one priced carrier service
//! - [`CarrierOutcome`]: quotes or failure from one carrier

pub mod outcome;
pub mod quote;
pub mod shipment;

pub use outcome::{CarrierFailure, CarrierOutcome, FailureReason};
pub use quote::{DeliveryWindow, Quote};
pub use shipment::{
    Address, Dimensions, Package, ResolvedShipment, ShipmentRequest, ShipmentRequestBuilder,
};
