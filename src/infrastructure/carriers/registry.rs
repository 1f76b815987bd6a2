//! # Static Adapter Registry
//!
//! Ordered, immutable [`AdapterRegistry`] built once at startup.

use crate::domain::value_objects::CarrierId;
use crate::infrastructure::carriers::envia::{EnviaAdapter, EnviaConfig};
use crate::infrastructure::carriers::error::CarrierResult;
use crate::infrastructure::carriers::traits::{AdapterRegistry, CarrierAdapter};
use std::sync::Arc;

/// Registry backed by an ordered list of adapters.
///
/// Registering a second adapter for the same carrier replaces the first
/// but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct StaticAdapterRegistry {
    adapters: Vec<Arc<dyn CarrierAdapter>>,
}

impl StaticAdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from adapters in the given order.
    #[must_use]
    pub fn from_adapters(adapters: impl IntoIterator<Item = Arc<dyn CarrierAdapter>>) -> Self {
        let mut registry = Self::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        registry
    }

    /// Builds one Envia-backed adapter per carrier, all sharing one HTTP
    /// connection pool.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` if the shared HTTP client cannot be built.
    pub fn envia(carriers: &[CarrierId], config: &EnviaConfig) -> CarrierResult<Self> {
        let client = config.client()?;
        let endpoint = config.rate_endpoint();
        let mut registry = Self::new();
        for carrier_id in carriers {
            registry.register(Arc::new(EnviaAdapter::with_client(
                carrier_id.clone(),
                endpoint.clone(),
                client.clone(),
            )));
        }
        Ok(registry)
    }

    /// Adds or replaces an adapter.
    pub fn register(&mut self, adapter: Arc<dyn CarrierAdapter>) {
        match self
            .adapters
            .iter_mut()
            .find(|existing| existing.carrier_id() == adapter.carrier_id())
        {
            Some(slot) => *slot = adapter,
            None => self.adapters.push(adapter),
        }
    }

    /// Returns the number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no adapters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl AdapterRegistry for StaticAdapterRegistry {
    fn get(&self, carrier_id: &CarrierId) -> Option<Arc<dyn CarrierAdapter>> {
        self.adapters
            .iter()
            .find(|adapter| adapter.carrier_id() == carrier_id)
            .cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Address, CarrierOutcome, Dimensions, Package, ResolvedShipment, ShipmentRequest,
    };
    use crate::domain::value_objects::RegionTable;
    use crate::infrastructure::carriers::http_client::BearerToken;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use tokio::time::Instant;

    #[derive(Debug)]
    struct NamedAdapter {
        carrier_id: CarrierId,
    }

    #[async_trait]
    impl CarrierAdapter for NamedAdapter {
        fn carrier_id(&self) -> &CarrierId {
            &self.carrier_id
        }

        async fn quote(&self, _shipment: &ResolvedShipment, _deadline: Instant) -> CarrierOutcome {
            CarrierOutcome::quotes(self.carrier_id.clone(), vec![])
        }
    }

    fn adapter(id: &str) -> Arc<dyn CarrierAdapter> {
        Arc::new(NamedAdapter {
            carrier_id: CarrierId::new(id),
        })
    }

    #[test]
    fn keeps_registration_order() {
        let registry =
            StaticAdapterRegistry::from_adapters([adapter("ups"), adapter("dhl"), adapter("fedex")]);
        let ids: Vec<&str> = registry
            .adapters
            .iter()
            .map(|adapter| adapter.carrier_id().as_str())
            .collect();
        assert_eq!(ids, ["ups", "dhl", "fedex"]);
    }

    #[test]
    fn register_replaces_in_place() {
        let mut registry = StaticAdapterRegistry::from_adapters([adapter("ups"), adapter("dhl")]);
        let replacement = adapter("ups");
        registry.register(Arc::clone(&replacement));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.adapters.first().unwrap().carrier_id().as_str(), "ups");
        let current = registry.get(&CarrierId::new("ups")).unwrap();
        assert!(Arc::ptr_eq(&current, &replacement));
    }

    #[test]
    fn get_unknown_is_none() {
        let registry = StaticAdapterRegistry::from_adapters([adapter("ups")]);
        assert!(registry.get(&CarrierId::new("estafeta")).is_none());
    }

    #[test]
    fn registered_adapter_answers_for_its_carrier() {
        let registry = StaticAdapterRegistry::from_adapters([adapter("paquetexpress")]);
        let shipment = ShipmentRequest::builder(
            Address::new("A", "Monterrey", "NL", "64000"),
            Address::new("B", "Puebla", "Puebla", "72000"),
        )
        .package(Package::new(
            Decimal::ONE,
            Dimensions::new(Decimal::ONE, Decimal::ONE, Decimal::ONE),
        ))
        .build()
        .resolve(&RegionTable::mexico())
        .unwrap();

        let adapter = registry.get(&CarrierId::new("paquetexpress")).unwrap();
        let outcome = tokio_test::block_on(adapter.quote(&shipment, Instant::now()));

        assert_eq!(outcome.carrier_id().as_str(), "paquetexpress");
        assert!(outcome.is_success());
    }

    #[test]
    fn envia_builds_one_adapter_per_carrier() {
        let config = EnviaConfig::new("https://api-test.envia.com", BearerToken::new("t"));
        let carriers = [CarrierId::new("fedex"), CarrierId::new("dhl")];
        let registry = StaticAdapterRegistry::envia(&carriers, &config).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&CarrierId::new("dhl")).is_some());
    }
}
