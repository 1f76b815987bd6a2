//! # Quote Aggregation Engine
//!
//! The single entry point for rating a shipment across carriers.
//!
//! [`QuoteAggregationEngine::get_ranked_quotes`] validates the request,
//! fans it out to every requested carrier under one overall deadline, ranks
//! the surviving quotes and keeps the best `k`. It makes exactly one attempt
//! per call; retry policy belongs to the caller.

use crate::application::error::AggregationError;
use crate::application::services::fan_out::FanOutCoordinator;
use crate::application::services::ranking_strategy::{
    CheapestFirst, RankedQuote, RankingStrategy, rank_with,
};
use crate::domain::entities::{CarrierFailure, CarrierOutcome, FailureReason, Quote, ShipmentRequest};
use crate::domain::errors::ValidationError;
use crate::domain::value_objects::{AggregationId, CarrierId, RegionTable};
use crate::infrastructure::carriers::traits::AdapterRegistry;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;

/// Carriers rated when no explicit set is given.
pub const DEFAULT_CARRIERS: [&str; 9] = [
    "fedex",
    "dhl",
    "redpack",
    "paquetexpress",
    "noventa9Minutos",
    "ivoy",
    "ups",
    "estafeta",
    "quicken",
];

/// Default number of quotes returned.
pub const DEFAULT_TOP_K: usize = 4;

/// Default overall deadline in milliseconds.
pub const DEFAULT_DEADLINE_MS: u64 = 10_000;

/// Configuration for quote aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Carriers queried by [`QuoteAggregationEngine::quote`], in order.
    ///
    /// Accepts a list or a comma-separated string.
    #[serde(deserialize_with = "carrier_list")]
    pub carriers: Vec<CarrierId>,
    /// Maximum number of quotes to return.
    pub top_k: usize,
    /// Overall deadline for one aggregation in milliseconds.
    pub deadline_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            carriers: DEFAULT_CARRIERS.iter().map(|c| CarrierId::new(*c)).collect(),
            top_k: DEFAULT_TOP_K,
            deadline_ms: DEFAULT_DEADLINE_MS,
        }
    }
}

fn carrier_list<'de, D>(deserializer: D) -> Result<Vec<CarrierId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<CarrierId>),
        Csv(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(carriers) => carriers,
        Raw::Csv(csv) => csv
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(CarrierId::new)
            .collect(),
    })
}

impl AggregationConfig {
    /// Sets the carrier set.
    #[must_use]
    pub fn with_carriers(mut self, carriers: impl IntoIterator<Item = CarrierId>) -> Self {
        self.carriers = carriers.into_iter().collect();
        self
    }

    /// Sets the number of quotes returned.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the overall deadline.
    #[must_use]
    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }

    /// Returns the overall deadline.
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

/// Successful aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    /// Id of the run, as logged.
    pub aggregation_id: AggregationId,
    /// Ranked quotes (best first), never empty.
    pub ranked_quotes: Vec<RankedQuote>,
    /// Number of carriers queried.
    pub carriers_queried: usize,
    /// Number of carriers that produced at least one quote.
    pub carriers_quoted: usize,
}

impl AggregationResult {
    /// Returns the best quote.
    #[must_use]
    pub fn best_quote(&self) -> Option<&RankedQuote> {
        self.ranked_quotes.first()
    }

    /// Returns the ranked quotes without rank information.
    #[must_use]
    pub fn quotes(&self) -> Vec<Quote> {
        self.ranked_quotes.iter().map(|r| r.quote.clone()).collect()
    }
}

/// Engine for collecting and ranking quotes from multiple carriers.
#[derive(Debug, Clone)]
pub struct QuoteAggregationEngine {
    coordinator: FanOutCoordinator,
    ranking_strategy: Arc<dyn RankingStrategy>,
    region_table: Arc<RegionTable>,
    config: AggregationConfig,
}

impl QuoteAggregationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(
        registry: Arc<dyn AdapterRegistry>,
        ranking_strategy: Arc<dyn RankingStrategy>,
        region_table: Arc<RegionTable>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            coordinator: FanOutCoordinator::new(registry),
            ranking_strategy,
            region_table,
            config,
        }
    }

    /// Creates an engine ranking cheapest-first over the Mexican region
    /// table with default configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<dyn AdapterRegistry>) -> Self {
        Self::new(
            registry,
            Arc::new(CheapestFirst),
            Arc::new(RegionTable::mexico()),
            AggregationConfig::default(),
        )
    }

    /// Rates `request` with the configured carriers, K and deadline.
    ///
    /// # Errors
    ///
    /// See [`get_ranked_quotes`](Self::get_ranked_quotes).
    pub async fn quote(
        &self,
        request: &ShipmentRequest,
    ) -> Result<AggregationResult, AggregationError> {
        self.get_ranked_quotes(
            request,
            &self.config.carriers,
            self.config.top_k,
            self.config.deadline(),
        )
        .await
    }

    /// Rates `request` with `carriers` and returns the best `k` quotes.
    ///
    /// # Errors
    ///
    /// - `AggregationError::Validation` if the request is invalid, `k` is
    ///   zero, `carriers` is empty or a region name is unknown. No carrier is
    ///   contacted in that case.
    /// - `AggregationError::AllFailed` if no quote survived, with one
    ///   failure per carrier
    /// - `AggregationError::Internal` if an adapter panicked
    pub async fn get_ranked_quotes(
        &self,
        request: &ShipmentRequest,
        carriers: &[CarrierId],
        k: usize,
        overall_deadline: Duration,
    ) -> Result<AggregationResult, AggregationError> {
        let aggregation_id = AggregationId::new_v4();
        let span = tracing::info_span!(
            "aggregation",
            id = %aggregation_id,
            carriers = carriers.len(),
            k,
            strategy = self.ranking_strategy.name(),
        );

        self.run(aggregation_id, request, carriers, k, overall_deadline)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        aggregation_id: AggregationId,
        request: &ShipmentRequest,
        carriers: &[CarrierId],
        k: usize,
        overall_deadline: Duration,
    ) -> Result<AggregationResult, AggregationError> {
        if k == 0 {
            return Err(ValidationError::InvalidTopK.into());
        }
        if carriers.is_empty() {
            return Err(ValidationError::NoCarriers.into());
        }
        let shipment = request.resolve(&self.region_table).inspect_err(|e| {
            tracing::info!(error = %e, "request rejected");
        })?;

        let started = Instant::now();
        let outcomes = self
            .coordinator
            .dispatch(carriers, Arc::new(shipment), started + overall_deadline)
            .await?;

        let ranked_quotes = rank_with(self.ranking_strategy.as_ref(), &outcomes, k);
        let carriers_quoted = outcomes
            .iter()
            .filter(|o| !o.quote_list().is_empty())
            .count();
        let elapsed_ms = started.elapsed().as_millis();

        if ranked_quotes.is_empty() {
            let failures = all_failures(&outcomes);
            tracing::warn!(failed = failures.len(), elapsed_ms, "all carriers failed");
            return Err(AggregationError::all_failed(failures));
        }

        tracing::info!(
            quotes = ranked_quotes.len(),
            carriers_quoted,
            elapsed_ms,
            "aggregation complete"
        );
        Ok(AggregationResult {
            aggregation_id,
            ranked_quotes,
            carriers_queried: carriers.len(),
            carriers_quoted,
        })
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the region table used for validation.
    #[must_use]
    pub fn region_table(&self) -> &RegionTable {
        &self.region_table
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }
}

/// One failure per outcome; empty successes count as malformed.
fn all_failures(outcomes: &[CarrierOutcome]) -> Vec<CarrierFailure> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            CarrierOutcome::Failure(failure) => failure.clone(),
            CarrierOutcome::Quotes { carrier_id, .. } => CarrierFailure {
                carrier_id: carrier_id.clone(),
                reason: FailureReason::malformed("carrier offered no rates"),
            },
        })
        .collect()
}
