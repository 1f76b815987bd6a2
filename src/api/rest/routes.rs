//! # REST Routes
//!
//! Router assembly and HTTP middleware.

use crate::api::rest::handlers::{AppState, cheapest_quote_handler, health_handler};
use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/shipments/cheapest-quote",
            post(cheapest_quote_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
