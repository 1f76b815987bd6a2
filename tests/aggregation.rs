//! End-to-end aggregation against a mock Envia server.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use rust_decimal::Decimal;
use serde_json::json;
use ship_rates::application::error::AggregationError;
use ship_rates::application::services::{AggregationConfig, CheapestFirst, QuoteAggregationEngine};
use ship_rates::domain::entities::{Address, Dimensions, FailureReason, Package, ShipmentRequest};
use ship_rates::domain::value_objects::{CarrierId, RegionTable};
use ship_rates::infrastructure::carriers::{BearerToken, EnviaConfig, StaticAdapterRegistry};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn carriers(names: &[&str]) -> Vec<CarrierId> {
    names.iter().map(|n| CarrierId::new(*n)).collect()
}

fn engine(server: &MockServer, names: &[&str], deadline_ms: u64) -> QuoteAggregationEngine {
    let envia = EnviaConfig::new(server.uri(), BearerToken::new("sandbox"));
    let registry = StaticAdapterRegistry::envia(&carriers(names), &envia).unwrap();
    QuoteAggregationEngine::new(
        Arc::new(registry),
        Arc::new(CheapestFirst),
        Arc::new(RegionTable::mexico()),
        AggregationConfig::default()
            .with_carriers(carriers(names))
            .with_top_k(2)
            .with_deadline_ms(deadline_ms),
    )
}

fn request_to(state: &str) -> ShipmentRequest {
    ShipmentRequest::builder(
        Address::new("Warehouse", "Monterrey", "NL", "64000"),
        Address::new("Ana", "Guadalajara", state, "44100"),
    )
    .package(
        Package::new(
            Decimal::new(6, 1),
            Dimensions::new(Decimal::new(40, 0), Decimal::TEN, Decimal::new(50, 0)),
        )
        .with_content("Pantalones"),
    )
    .build()
}

async fn mount_rates(server: &MockServer, carrier: &str, rates: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/ship/rate/"))
        .and(header("authorization", "Bearer sandbox"))
        .and(body_partial_json(json!({"shipment": {"carrier": carrier}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": "rate",
            "data": rates
        })))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, carrier: &str, status: u16) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"shipment": {"carrier": carrier}})))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn cheapest_quotes_across_carriers_with_partial_failure() {
    let server = MockServer::start().await;
    mount_rates(
        &server,
        "fedex",
        json!([
            {"carrier": "fedex", "service": "express", "totalPrice": 150, "currency": "MXN"},
            {"carrier": "fedex", "service": "ground", "totalPrice": 99.5, "currency": "MXN"}
        ]),
    )
    .await;
    mount_rates(
        &server,
        "dhl",
        json!([{"carrier": "dhl", "service": "express", "totalPrice": "120.00"}]),
    )
    .await;
    mount_status(&server, "ups", 500).await;

    let engine = engine(&server, &["fedex", "dhl", "ups"], 3000);
    let result = engine.quote(&request_to("Jalisco")).await.unwrap();

    let ranked: Vec<(String, Decimal)> = result
        .ranked_quotes
        .iter()
        .map(|r| (r.quote.carrier_id().to_string(), r.quote.total_price().amount()))
        .collect();
    assert_eq!(
        ranked,
        [
            ("fedex".to_string(), Decimal::new(995, 1)),
            ("dhl".to_string(), Decimal::new(120, 0)),
        ]
    );
    assert_eq!(result.carriers_queried, 3);
    assert_eq!(result.carriers_quoted, 2);
}

#[tokio::test]
async fn rates_in_a_foreign_currency_are_not_ranked() {
    let server = MockServer::start().await;
    mount_rates(
        &server,
        "fedex",
        json!([{"carrier": "fedex", "service": "intl", "totalPrice": 50, "currency": "USD"}]),
    )
    .await;
    mount_rates(
        &server,
        "dhl",
        json!([{"carrier": "dhl", "service": "express", "totalPrice": 100, "currency": "MXN"}]),
    )
    .await;

    let engine = engine(&server, &["fedex", "dhl"], 3000);
    let result = engine.quote(&request_to("Jalisco")).await.unwrap();

    assert_eq!(result.ranked_quotes.len(), 1);
    let best = &result.ranked_quotes[0].quote;
    assert_eq!(best.carrier_id().as_str(), "dhl");
    assert_eq!(best.total_price().to_string(), "100.00 MXN");
    assert_eq!(result.carriers_quoted, 1);
}

#[tokio::test]
async fn destination_state_is_sent_as_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "destination": {"state": "JA", "country": "MX"},
            "origin": {"state": "NL"},
            "settings": {"currency": "MXN"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": "rate",
            "data": [{"carrier": "estafeta", "service": "std", "totalPrice": 80}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, &["estafeta"], 3000);
    let result = engine.quote(&request_to("jalisco")).await.unwrap();
    assert_eq!(result.ranked_quotes.len(), 1);
}

#[tokio::test]
async fn all_failed_reports_every_carrier() {
    let server = MockServer::start().await;
    mount_status(&server, "fedex", 401).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"shipment": {"carrier": "dhl"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"meta": "error", "error": "no coverage"})),
        )
        .mount(&server)
        .await;

    let engine = engine(&server, &["fedex", "dhl"], 3000);
    let err = engine.quote(&request_to("Jalisco")).await.unwrap_err();

    let AggregationError::AllFailed { failures } = err else {
        panic!("expected AllFailed, got {:?}", err);
    };
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].carrier_id.as_str(), "fedex");
    assert_eq!(failures[0].reason, FailureReason::http_error(401));
    assert_eq!(failures[1].reason.kind(), "malformed_response");
}

#[tokio::test]
async fn unknown_region_sends_no_requests() {
    let server = MockServer::start().await;
    mount_rates(&server, "fedex", json!([])).await;

    let engine = engine(&server, &["fedex"], 3000);
    let err = engine.quote(&request_to("Atlantis")).await.unwrap_err();

    assert!(err.is_validation());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn slow_carrier_is_cut_off_at_deadline() {
    let server = MockServer::start().await;
    mount_rates(
        &server,
        "fedex",
        json!([{"carrier": "fedex", "service": "ground", "totalPrice": 90}]),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"shipment": {"carrier": "dhl"}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"meta": "rate", "data": [
                    {"carrier": "dhl", "service": "x", "totalPrice": 1}
                ]}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let engine = engine(&server, &["fedex", "dhl"], 300);
    let started = std::time::Instant::now();
    let result = engine.quote(&request_to("Jalisco")).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(result.ranked_quotes.len(), 1);
    assert_eq!(result.ranked_quotes[0].quote.carrier_id().as_str(), "fedex");
}
