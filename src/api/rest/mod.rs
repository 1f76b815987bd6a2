//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Shipments
//! - `POST /api/v1/shipments/cheapest-quote` - Rank carrier quotes for a
//!   recipient. `200` with a JSON array of quotes, `422` for an invalid
//!   request, `502` when every carrier failed, `500` on internal faults.
//!
//! ## Health
//! - `GET /api/v1/health` - Liveness and configured carrier count
//!
//! # Usage
//!
//! ```ignore
//! use ship_rates::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(engine), origin, default_package);
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, CheapestQuoteRequest, ErrorResponse, PackageRequest, QuoteResponse,
};
pub use routes::create_router;
