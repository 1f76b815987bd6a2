//! # ship-rates
//!
//! Concurrent multi-carrier shipping rate aggregation.
//!
//! Given one shipment, `ship-rates` asks every configured carrier for a
//! price at the same time, tolerates carriers that fail or run late, and
//! returns the cheapest `k` offers.
//!
//! # Architecture
//!
//! ```text
//! ShipmentRequest ─► validate + resolve regions ─► FanOutCoordinator
//!                                                   │  │  │ (one task per carrier,
//!                                                   ▼  ▼  ▼  shared deadline)
//!                                         CarrierAdapter::quote ×N
//!                                                   │
//!                                   Vec<CarrierOutcome> (carrier order)
//!                                                   │
//!                                   RankingStrategy ─► top-K quotes
//! ```
//!
//! - [`domain`]: shipments, quotes, outcomes, regions. No I/O.
//! - [`infrastructure`]: carrier adapters and the HTTP client they share
//! - [`application`]: fan-out, ranking and the aggregation facade
//! - [`api`]: axum REST surface
//! - [`settings`]: layered configuration
//! - [`telemetry`]: `tracing` subscriber setup
//!
//! # Example
//!
//! ```ignore
//! use ship_rates::application::services::QuoteAggregationEngine;
//! use ship_rates::infrastructure::carriers::{EnviaConfig, StaticAdapterRegistry};
//! use std::sync::Arc;
//!
//! let registry = StaticAdapterRegistry::envia(&carriers, &EnviaConfig::default())?;
//! let engine = QuoteAggregationEngine::with_defaults(Arc::new(registry));
//! let result = engine.quote(&request).await?;
//! println!("{}", result.ranked_quotes[0]);
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod settings;
pub mod telemetry;
