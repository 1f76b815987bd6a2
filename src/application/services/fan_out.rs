//! # Fan-Out Coordinator
//!
//! Runs one adapter call per carrier concurrently under a shared deadline.
//!
//! All calls are spawned into a single [`JoinSet`] before any result is
//! awaited. Results are written into per-carrier slots keyed by task id, so
//! the returned outcomes follow the requested carrier order no matter which
//! carrier answers first. When the deadline passes every unfinished task is
//! aborted and its slot becomes a `Failure{timeout}`.

use crate::application::error::AggregationError;
use crate::domain::entities::{CarrierOutcome, FailureReason, ResolvedShipment};
use crate::domain::value_objects::CarrierId;
use crate::infrastructure::carriers::traits::AdapterRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinSet};
use tokio::time::{Instant, timeout_at};

/// Dispatches a shipment to many carriers at once.
#[derive(Debug, Clone)]
pub struct FanOutCoordinator {
    registry: Arc<dyn AdapterRegistry>,
}

impl FanOutCoordinator {
    /// Creates a coordinator over `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn AdapterRegistry>) -> Self {
        Self { registry }
    }

    /// Quotes `shipment` with every carrier in `carriers`.
    ///
    /// Returns exactly one outcome per requested carrier, in the same
    /// order. Never returns early on the first success or failure; waits
    /// until every call settles or `deadline` passes.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::Internal`] if an adapter task panics.
    /// Every other problem is reported as a per-carrier failure outcome.
    pub async fn dispatch(
        &self,
        carriers: &[CarrierId],
        shipment: Arc<ResolvedShipment>,
        deadline: Instant,
    ) -> Result<Vec<CarrierOutcome>, AggregationError> {
        let mut slots: Vec<Option<CarrierOutcome>> = vec![None; carriers.len()];
        let mut tasks = JoinSet::new();
        let mut slot_of: HashMap<Id, usize> = HashMap::with_capacity(carriers.len());

        for (index, carrier_id) in carriers.iter().enumerate() {
            match self.registry.get(carrier_id) {
                Some(adapter) => {
                    let shipment = Arc::clone(&shipment);
                    let handle =
                        tasks.spawn(async move { adapter.quote(&shipment, deadline).await });
                    slot_of.insert(handle.id(), index);
                }
                None => {
                    tracing::warn!(carrier = %carrier_id, "no adapter registered");
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(CarrierOutcome::failure(
                            carrier_id.clone(),
                            FailureReason::transport("no adapter registered"),
                        ));
                    }
                }
            }
        }

        loop {
            match timeout_at(deadline, tasks.join_next_with_id()).await {
                Ok(None) => break,
                Ok(Some(Ok((id, outcome)))) => {
                    if let Some(slot) = slot_of.get(&id).and_then(|&i| slots.get_mut(i)) {
                        *slot = Some(outcome);
                    }
                }
                Ok(Some(Err(join_error))) => {
                    if join_error.is_panic() {
                        tasks.abort_all();
                        let carrier = slot_of
                            .get(&join_error.id())
                            .and_then(|&i| carriers.get(i))
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        tracing::error!(carrier = %carrier, "carrier adapter panicked");
                        return Err(AggregationError::internal(format!(
                            "adapter for `{}` panicked",
                            carrier
                        )));
                    }
                }
                Err(_) => {
                    tracing::debug!(pending = tasks.len(), "deadline reached, aborting carriers");
                    tasks.abort_all();
                    break;
                }
            }
        }

        Ok(slots
            .into_iter()
            .zip(carriers)
            .map(|(slot, carrier_id)| {
                slot.unwrap_or_else(|| CarrierOutcome::timeout(carrier_id.clone()))
            })
            .collect())
    }
}
