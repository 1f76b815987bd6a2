//! # Application Layer
//!
//! Orchestration of carrier adapters into ranked quote lists.
//!
//! - [`services::QuoteAggregationEngine`]: the aggregation facade
//! - [`services::FanOutCoordinator`]: concurrent dispatch under a deadline
//! - [`services::RankingStrategy`]: quote ordering
//! - [`error::AggregationError`]: what the facade can fail with

pub mod error;
pub mod services;
