//! # API Layer
//!
//! Inbound HTTP surface over the aggregation facade.

pub mod rest;
