//! # REST Handlers
//!
//! Request/response types and axum handlers.

use crate::application::error::AggregationError;
use crate::application::services::{QuoteAggregationEngine, RankedQuote};
use crate::domain::entities::{Address, CarrierFailure, Dimensions, Package, ShipmentRequest};
use crate::domain::value_objects::{Currency, LengthUnit, PackageType, WeightUnit};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The aggregation facade.
    pub engine: Arc<QuoteAggregationEngine>,
    /// Address every shipment leaves from.
    pub origin: Arc<Address>,
    /// Package used when a request names none.
    pub default_package: Arc<Package>,
    /// Process start, for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    /// Creates handler state.
    #[must_use]
    pub fn new(engine: Arc<QuoteAggregationEngine>, origin: Address, default_package: Package) -> Self {
        Self {
            engine,
            origin: Arc::new(origin),
            default_package: Arc::new(default_package),
            start_time: Instant::now(),
        }
    }
}

/// Body of `POST /api/v1/shipments/cheapest-quote`: the recipient.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheapestQuoteRequest {
    /// Recipient name.
    pub name: String,
    /// Recipient company.
    pub company: String,
    /// Recipient email.
    pub email: String,
    /// Recipient phone.
    pub phone: String,
    /// Street name.
    pub street_name: String,
    /// Street number.
    pub street_number: String,
    /// Colony (district).
    pub colony: String,
    /// City.
    pub city: String,
    /// State name, e.g. `"Jalisco"`.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Packages; the configured default package when empty.
    pub packages: Vec<PackageRequest>,
    /// Quote currency; MXN when absent.
    pub currency: Option<Currency>,
    /// Number of quotes wanted; the configured K when absent.
    pub top_k: Option<usize>,
}

impl CheapestQuoteRequest {
    /// Builds the canonical request from `origin` to this recipient.
    #[must_use]
    pub fn into_shipment(self, origin: &Address, default_package: &Package) -> ShipmentRequest {
        let destination = Address {
            name: self.name,
            company: self.company,
            email: self.email,
            phone: self.phone,
            street: self.street_name,
            number: self.street_number,
            district: self.colony,
            city: self.city,
            state: self.state,
            country: "MX".to_string(),
            postal_code: self.postal_code,
            reference: String::new(),
        };

        let packages: Vec<Package> = if self.packages.is_empty() {
            vec![default_package.clone()]
        } else {
            self.packages.into_iter().map(Package::from).collect()
        };

        ShipmentRequest::builder(origin.clone(), destination)
            .packages(packages)
            .currency(self.currency.unwrap_or_default())
            .build()
    }
}

/// One package as sent by API clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    /// Content description.
    #[serde(default)]
    pub content: String,
    /// Number of identical packages.
    #[serde(default = "one")]
    pub amount: u32,
    /// Packaging.
    #[serde(default, rename = "type")]
    pub package_type: PackageType,
    /// Weight.
    pub weight: Decimal,
    /// Weight unit.
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Length unit.
    #[serde(default)]
    pub length_unit: LengthUnit,
    /// Outer dimensions.
    pub dimensions: Dimensions,
    /// Declared value.
    #[serde(default)]
    pub declared_value: Decimal,
    /// Insured amount.
    #[serde(default)]
    pub insurance: Decimal,
}

fn one() -> u32 {
    1
}

impl From<PackageRequest> for Package {
    fn from(p: PackageRequest) -> Self {
        Package::new(p.weight, p.dimensions)
            .with_content(p.content)
            .with_amount(p.amount)
            .with_package_type(p.package_type)
            .with_units(p.weight_unit, p.length_unit)
            .with_declared_value(p.declared_value)
            .with_insurance(p.insurance)
    }
}

/// One ranked quote in a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Position in the ranking, 1 = best.
    pub rank: usize,
    /// Carrier id.
    pub carrier: String,
    /// Carrier service id.
    pub service: String,
    /// Human-readable service name.
    pub service_description: String,
    /// Total price.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Carrier's delivery wording.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_estimate: Option<String>,
    /// Business days until delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,
    /// Expected delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
}

impl From<&RankedQuote> for QuoteResponse {
    fn from(ranked: &RankedQuote) -> Self {
        let quote = &ranked.quote;
        let window = quote.delivery_window();
        Self {
            rank: ranked.rank,
            carrier: quote.carrier_id().to_string(),
            service: quote.service_id().to_string(),
            service_description: quote.service_description().to_string(),
            total_price: quote.total_price().amount(),
            currency: quote.total_price().currency().to_string(),
            delivery_estimate: window.and_then(|w| w.description.clone()),
            delivery_days: window.and_then(|w| w.business_days),
            delivery_date: window.and_then(|w| w.date),
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
    /// Per-carrier failures when every carrier failed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CarrierFailure>,
}

/// Handler error mapped onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub AggregationError);

impl From<AggregationError> for ApiError {
    fn from(error: AggregationError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AggregationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AggregationError::AllFailed { .. } => StatusCode::BAD_GATEWAY,
            AggregationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            AggregationError::AllFailed { failures } => ErrorResponse {
                error: "failed to get any quotes".to_string(),
                failures,
            },
            AggregationError::Internal(_) => ErrorResponse {
                error: "internal error".to_string(),
                failures: Vec::new(),
            },
            other => ErrorResponse {
                error: other.to_string(),
                failures: Vec::new(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// `POST /api/v1/shipments/cheapest-quote`
///
/// # Errors
///
/// `422` for invalid requests, `502` when every carrier failed, `500` for
/// internal faults.
pub async fn cheapest_quote_handler(
    State(state): State<AppState>,
    Json(body): Json<CheapestQuoteRequest>,
) -> Result<Json<Vec<QuoteResponse>>, ApiError> {
    let config = state.engine.config();
    let top_k = body.top_k.unwrap_or(config.top_k);
    let request = body.into_shipment(&state.origin, &state.default_package);

    let result = state
        .engine
        .get_ranked_quotes(&request, &config.carriers, top_k, config.deadline())
        .await?;

    Ok(Json(
        result.ranked_quotes.iter().map(QuoteResponse::from).collect(),
    ))
}

/// `GET /api/v1/health`
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "carriers": state.engine.config().carriers.len(),
        "ranking": state.engine.ranking_strategy_name(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}
