//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`CarrierId`], [`ServiceId`]: String-based identifiers
//! - [`AggregationId`]: UUID correlating one aggregation run
//!
//! ## Numeric Types
//!
//! - [`Money`]: Non-negative decimal amount tagged with a [`Currency`]
//!
//! ## Regions
//!
//! - [`RegionCode`], [`RegionTable`]: state name to carrier code lookup
//!
//! ## Domain Enums
//!
//! - `WeightUnit`, `LengthUnit`, `PackageType`, `ServiceType`

pub mod enums;
pub mod ids;
pub mod money;
pub mod region;

pub use enums::{LengthUnit, PackageType, ParseEnumError, ServiceType, WeightUnit};
pub use ids::{AggregationId, CarrierId, ServiceId};
pub use money::{Currency, Money};
pub use region::{RegionCode, RegionTable};
