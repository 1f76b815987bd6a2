//! # Infrastructure Layer
//!
//! Outbound integrations with external carrier APIs.

pub mod carriers;
