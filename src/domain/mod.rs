//! # Domain Layer
//!
//! Shipment, quote and outcome types with no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
