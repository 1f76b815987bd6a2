//! # Carrier Integrations
//!
//! Adapters that turn a resolved shipment into carrier rate calls.
//!
//! - [`CarrierAdapter`]: the port every carrier integration implements
//! - [`EnviaAdapter`]: Envia-backed adapter, one instance per carrier
//! - [`StaticAdapterRegistry`]: ordered lookup of configured adapters

pub mod envia;
pub mod error;
pub mod http_client;
pub mod registry;
pub mod traits;

pub use envia::{EnviaAdapter, EnviaConfig};
pub use error::{CarrierError, CarrierResult};
pub use http_client::{BearerToken, HttpClient};
pub use registry::StaticAdapterRegistry;
pub use traits::{AdapterRegistry, CarrierAdapter};
