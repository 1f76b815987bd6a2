//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`QuoteAggregationEngine`]: Validation, fan-out and ranking in one call
//! - [`FanOutCoordinator`]: Concurrent carrier dispatch with a shared deadline
//! - [`RankingStrategy`]: Strategies for ranking quotes

pub mod fan_out;
pub mod quote_aggregation;
pub mod ranking_strategy;

pub use fan_out::FanOutCoordinator;
pub use quote_aggregation::{AggregationConfig, AggregationResult, QuoteAggregationEngine};
pub use ranking_strategy::{
    CheapestFirst, FastestDelivery, RankedQuote, RankingKind, RankingStrategy, failures,
    flatten_quotes, rank, rank_with,
};
