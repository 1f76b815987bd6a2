//! # Envia Rate Adapter
//!
//! Rates a single carrier through the Envia shipping API.
//!
//! Envia fronts many carriers behind one endpoint; the carrier is chosen by
//! `shipment.carrier` in the request body. Each [`EnviaAdapter`] is bound
//! to one carrier, so the registry holds one instance per configured
//! carrier.
//!
//! ## Wire format
//!
//! Request: `POST {base_url}/ship/rate/` with a bearer token and a JSON
//! body of `origin`, `destination`, `packages`, `shipment` and `settings`.
//!
//! Success: `{"meta": "rate", "data": [ {rate}, ... ]}` where each rate has
//! `carrier`, `service`, `serviceDescription`, `totalPrice`, `currency`
//! and optionally `deliveryEstimate` / `deliveryDate`. Any other `meta`
//! value is treated as a malformed response.

use crate::domain::entities::{
    Address, CarrierOutcome, DeliveryWindow, FailureReason, Package, Quote, ResolvedShipment,
};
use crate::domain::value_objects::{
    CarrierId, Currency, LengthUnit, Money, RegionCode, ServiceId, WeightUnit,
};
use crate::infrastructure::carriers::error::CarrierResult;
use crate::infrastructure::carriers::http_client::{BearerToken, HttpClient};
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::time::{Instant, timeout_at};

/// Default Envia sandbox base URL.
pub const DEFAULT_BASE_URL: &str = "https://api-test.envia.com";

/// Default path of the rate endpoint.
pub const DEFAULT_RATE_PATH: &str = "/ship/rate/";

/// Default per-request HTTP timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 8000;

/// Envelope tag of a successful rate response.
const RATE_META: &str = "rate";

/// Connection settings for the Envia API.
///
/// One base URL and one credential per environment, shared by every
/// carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnviaConfig {
    base_url: String,
    rate_path: String,
    token: BearerToken,
    request_timeout_ms: u64,
}

impl Default for EnviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_path: DEFAULT_RATE_PATH.to_string(),
            token: BearerToken::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl EnviaConfig {
    /// Creates a configuration for `base_url` with the default rate path.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: BearerToken) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            ..Self::default()
        }
    }

    /// Sets the rate endpoint path.
    #[must_use]
    pub fn with_rate_path(mut self, rate_path: impl Into<String>) -> Self {
        self.rate_path = rate_path.into();
        self
    }

    /// Sets the per-request HTTP timeout.
    #[must_use]
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: BearerToken) -> Self {
        self.token = token;
        self
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the bearer token.
    #[inline]
    #[must_use]
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Returns the per-request HTTP timeout.
    #[inline]
    #[must_use]
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    /// Returns the full rate endpoint URL.
    #[must_use]
    pub fn rate_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.rate_path.trim_start_matches('/')
        )
    }

    /// Builds an authenticated HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be built.
    pub fn client(&self) -> CarrierResult<HttpClient> {
        HttpClient::new(self.request_timeout_ms, &self.token)
    }
}

/// Adapter rating one carrier through Envia.
#[derive(Debug, Clone)]
pub struct EnviaAdapter {
    carrier_id: CarrierId,
    endpoint: String,
    client: HttpClient,
}

impl EnviaAdapter {
    /// Creates an adapter with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be built.
    pub fn new(carrier_id: CarrierId, config: &EnviaConfig) -> CarrierResult<Self> {
        Ok(Self::with_client(
            carrier_id,
            config.rate_endpoint(),
            config.client()?,
        ))
    }

    /// Creates an adapter sharing an existing client.
    #[must_use]
    pub fn with_client(carrier_id: CarrierId, endpoint: impl Into<String>, client: HttpClient) -> Self {
        Self {
            carrier_id,
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Returns the rate endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CarrierAdapter for EnviaAdapter {
    fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    async fn quote(&self, shipment: &ResolvedShipment, deadline: Instant) -> CarrierOutcome {
        let body = RateRequest::new(&self.carrier_id, shipment);
        let started = Instant::now();

        let outcome = match timeout_at(
            deadline,
            self.client.post::<RateEnvelope, _>(&self.endpoint, &body),
        )
        .await
        {
            Err(_) => CarrierOutcome::timeout(self.carrier_id.clone()),
            Ok(Err(error)) => {
                tracing::debug!(carrier = %self.carrier_id, error = %error, "rate request failed");
                CarrierOutcome::failure(self.carrier_id.clone(), error.into())
            }
            Ok(Ok(envelope)) => outcome_from_envelope(&self.carrier_id, envelope, shipment.currency()),
        };

        let elapsed_ms = started.elapsed().as_millis();
        match &outcome {
            CarrierOutcome::Quotes { quotes, .. } => tracing::debug!(
                carrier = %self.carrier_id,
                quotes = quotes.len(),
                elapsed_ms,
                "carrier responded"
            ),
            CarrierOutcome::Failure(failure) => tracing::warn!(
                carrier = %self.carrier_id,
                reason = %failure.reason,
                elapsed_ms,
                "carrier produced no quotes"
            ),
        }
        outcome
    }
}

// Request wire types.

#[derive(Debug, Serialize)]
struct RateRequest<'a> {
    origin: WireAddress<'a>,
    destination: WireAddress<'a>,
    packages: Vec<WirePackage<'a>>,
    shipment: WireShipment<'a>,
    settings: WireSettings<'a>,
}

impl<'a> RateRequest<'a> {
    fn new(carrier_id: &'a CarrierId, shipment: &'a ResolvedShipment) -> Self {
        let request = shipment.request();
        Self {
            origin: WireAddress::new(request.origin(), shipment.origin_region()),
            destination: WireAddress::new(request.destination(), shipment.destination_region()),
            packages: request.packages().iter().map(WirePackage::new).collect(),
            shipment: WireShipment {
                carrier: carrier_id.as_str(),
                service_type: request.service_type().code(),
            },
            settings: WireSettings {
                currency: request.currency().as_str(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireAddress<'a> {
    name: &'a str,
    company: &'a str,
    email: &'a str,
    phone: &'a str,
    street: &'a str,
    number: &'a str,
    district: &'a str,
    city: &'a str,
    state: &'a str,
    country: &'a str,
    postal_code: &'a str,
    reference: &'a str,
    coordinates: WireCoordinates,
}

impl<'a> WireAddress<'a> {
    fn new(address: &'a Address, region: &'a RegionCode) -> Self {
        Self {
            name: &address.name,
            company: &address.company,
            email: &address.email,
            phone: &address.phone,
            street: &address.street,
            number: &address.number,
            district: &address.district,
            city: &address.city,
            state: region.as_str(),
            country: &address.country,
            postal_code: &address.postal_code,
            reference: &address.reference,
            coordinates: WireCoordinates::default(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct WireCoordinates {
    latitude: &'static str,
    longitude: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePackage<'a> {
    content: &'a str,
    amount: u32,
    #[serde(rename = "type")]
    package_type: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    weight: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    declared_value: Decimal,
    weight_unit: WeightUnit,
    length_unit: LengthUnit,
    dimensions: WireDimensions,
}

impl<'a> WirePackage<'a> {
    fn new(package: &'a Package) -> Self {
        let dimensions = package.dimensions();
        Self {
            content: package.content(),
            amount: package.amount(),
            package_type: package.package_type().as_str(),
            weight: package.weight(),
            insurance: package.insurance(),
            declared_value: package.declared_value(),
            weight_unit: package.weight_unit(),
            length_unit: package.length_unit(),
            dimensions: WireDimensions {
                length: dimensions.length,
                width: dimensions.width,
                height: dimensions.height,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WireDimensions {
    #[serde(with = "rust_decimal::serde::float")]
    length: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    width: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    height: Decimal,
}

#[derive(Debug, Serialize)]
struct WireShipment<'a> {
    carrier: &'a str,
    #[serde(rename = "type")]
    service_type: u8,
}

#[derive(Debug, Serialize)]
struct WireSettings<'a> {
    currency: &'a str,
}

// Response wire types. Every field is optional so that shape problems are
// reported as malformed responses rather than opaque parse errors.

#[derive(Debug, Deserialize)]
struct RateEnvelope {
    #[serde(default)]
    meta: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateEntry {
    #[serde(default)]
    carrier: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    service_description: Option<String>,
    #[serde(default)]
    total_price: Option<serde_json::Value>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    delivery_estimate: Option<String>,
    #[serde(default)]
    delivery_date: Option<WireDeliveryDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDeliveryDate {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    date_difference: Option<serde_json::Value>,
}

fn outcome_from_envelope(
    carrier_id: &CarrierId,
    envelope: RateEnvelope,
    currency: &Currency,
) -> CarrierOutcome {
    match quotes_from_envelope(carrier_id, envelope, currency) {
        Ok(quotes) => CarrierOutcome::quotes(carrier_id.clone(), quotes),
        Err(reason) => CarrierOutcome::failure(carrier_id.clone(), reason),
    }
}

fn quotes_from_envelope(
    carrier_id: &CarrierId,
    envelope: RateEnvelope,
    currency: &Currency,
) -> Result<Vec<Quote>, FailureReason> {
    match envelope.meta.as_deref() {
        Some(RATE_META) => {}
        Some(other) => {
            let detail = envelope
                .error
                .map(|e| format!(" ({})", e))
                .unwrap_or_default();
            return Err(FailureReason::malformed(format!(
                "unexpected response kind `{}`{}",
                other, detail
            )));
        }
        None => return Err(FailureReason::malformed("response has no `meta` tag")),
    }

    let data = envelope
        .data
        .ok_or_else(|| FailureReason::malformed("rate response has no `data`"))?;
    let entries: Vec<RateEntry> = serde_json::from_value(data)
        .map_err(|e| FailureReason::malformed(format!("rate data is not a list of rates: {}", e)))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_quote(carrier_id, currency)
                .map_err(|message| FailureReason::malformed(format!("rate {}: {}", index, message)))
        })
        .collect()
}

impl RateEntry {
    fn into_quote(self, carrier_id: &CarrierId, currency: &Currency) -> Result<Quote, String> {
        if let Some(carrier) = self.carrier.as_deref() {
            if !carrier_id.matches(carrier) {
                return Err(format!("carrier `{}` does not match `{}`", carrier, carrier_id));
            }
        }

        let service = self
            .service
            .filter(|s| !s.trim().is_empty())
            .ok_or("missing `service`")?;

        let amount = self
            .total_price
            .as_ref()
            .ok_or_else(|| "missing `totalPrice`".to_string())
            .and_then(parse_decimal)?;

        if let Some(code) = self.currency.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            let stated = Currency::new(code).map_err(|e| e.to_string())?;
            if &stated != currency {
                return Err(format!("priced in {} but {} was requested", stated, currency));
            }
        }
        let total_price = Money::new(amount, currency.clone()).map_err(|e| e.to_string())?;

        let description = self
            .service_description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| service.clone());

        let window = DeliveryWindow {
            description: self.delivery_estimate.filter(|d| !d.trim().is_empty()),
            business_days: self
                .delivery_date
                .as_ref()
                .and_then(|d| d.date_difference.as_ref())
                .and_then(parse_days),
            date: self
                .delivery_date
                .as_ref()
                .and_then(|d| d.date.as_deref())
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
        };

        Ok(Quote::new(carrier_id.clone(), ServiceId::new(service), description, total_price)
            .with_delivery_window(window))
    }
}

fn parse_decimal(value: &serde_json::Value) -> Result<Decimal, String> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        other => return Err(format!("`totalPrice` is not a number: {}", other)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("`totalPrice` is not a number: {}", text))
}

fn parse_days(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{Dimensions, ShipmentRequest};
    use crate::domain::value_objects::RegionTable;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shipment() -> ResolvedShipment {
        let package = Package::new(
            Decimal::new(6, 1),
            Dimensions::new(Decimal::new(40, 0), Decimal::new(10, 0), Decimal::new(50, 0)),
        )
        .with_content("Pantalones");
        ShipmentRequest::builder(
            Address::new("Origin", "Monterrey", "NL", "64000"),
            Address::new("Ana", "Guadalajara", "Jalisco", "44100"),
        )
        .package(package)
        .build()
        .resolve(&RegionTable::mexico())
        .unwrap()
    }

    fn envelope(value: serde_json::Value) -> RateEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn fedex() -> CarrierId {
        CarrierId::new("fedex")
    }

    mod mapping {
        use super::*;

        #[test]
        fn maps_every_rate_in_order() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({
                    "meta": "rate",
                    "data": [
                        {"carrier": "fedex", "service": "express", "serviceDescription": "FedEx Express",
                         "totalPrice": 120.5, "currency": "MXN",
                         "deliveryEstimate": "1 día", "deliveryDate": {"date": "2026-10-21", "dateDifference": 1}},
                        {"carrier": "FEDEX", "service": "ground", "totalPrice": "95"}
                    ]
                })),
                &Currency::mxn(),
            );

            let quotes = outcome.quote_list();
            assert_eq!(quotes.len(), 2);
            assert_eq!(quotes[0].service_id().as_str(), "express");
            assert_eq!(quotes[0].total_price().amount(), Decimal::new(1205, 1));
            let window = quotes[0].delivery_window().unwrap();
            assert_eq!(window.business_days, Some(1));
            assert_eq!(window.date, NaiveDate::from_ymd_opt(2026, 10, 21));
            assert_eq!(window.description.as_deref(), Some("1 día"));
            assert_eq!(quotes[1].service_description(), "ground");
            assert_eq!(quotes[1].total_price().currency(), &Currency::mxn());
        }

        #[test]
        fn empty_rate_list_is_success_without_quotes() {
            let outcome =
                outcome_from_envelope(&fedex(), envelope(json!({"meta": "rate", "data": []})), &Currency::mxn());
            assert!(outcome.is_success());
            assert!(outcome.quote_list().is_empty());
        }

        #[test]
        fn error_meta_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "error", "error": {"message": "invalid zip"}})),
                &Currency::mxn(),
            );
            let failure = outcome.as_failure().unwrap();
            assert_eq!(failure.reason.kind(), "malformed_response");
            assert!(failure.reason.to_string().contains("invalid zip"));
        }

        #[test]
        fn missing_meta_is_malformed() {
            let outcome = outcome_from_envelope(&fedex(), envelope(json!({"data": []})), &Currency::mxn());
            assert_eq!(outcome.as_failure().unwrap().reason.kind(), "malformed_response");
        }

        #[test]
        fn missing_price_is_failure_not_zero_quote() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": [{"service": "express"}]})),
                &Currency::mxn(),
            );
            let failure = outcome.as_failure().unwrap();
            assert!(failure.reason.to_string().contains("totalPrice"));
        }

        #[test]
        fn negative_price_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": [{"service": "x", "totalPrice": -3}]})),
                &Currency::mxn(),
            );
            assert!(!outcome.is_success());
        }

        #[test]
        fn unparseable_price_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": [{"service": "x", "totalPrice": "free"}]})),
                &Currency::mxn(),
            );
            assert!(!outcome.is_success());
        }

        #[test]
        fn foreign_carrier_rate_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": [{"carrier": "dhl", "service": "x", "totalPrice": 1}]})),
                &Currency::mxn(),
            );
            assert!(outcome.as_failure().unwrap().reason.to_string().contains("dhl"));
        }

        #[test]
        fn rate_in_another_currency_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": [
                    {"carrier": "fedex", "service": "intl", "totalPrice": 50, "currency": "USD"},
                    {"carrier": "fedex", "service": "ground", "totalPrice": 100, "currency": "mxn"}
                ]})),
                &Currency::mxn(),
            );
            let failure = outcome.as_failure().unwrap();
            assert_eq!(failure.reason.kind(), "malformed_response");
            assert!(failure.reason.to_string().contains("USD"));
        }

        #[test]
        fn non_list_data_is_malformed() {
            let outcome = outcome_from_envelope(
                &fedex(),
                envelope(json!({"meta": "rate", "data": {"service": "x"}})),
                &Currency::mxn(),
            );
            assert!(!outcome.is_success());
        }
    }

    mod request_body {
        use super::*;

        #[test]
        fn carries_carrier_and_resolved_regions() {
            let carrier = fedex();
            let shipment = shipment();
            let body = serde_json::to_value(RateRequest::new(&carrier, &shipment)).unwrap();

            assert_eq!(body["shipment"]["carrier"], "fedex");
            assert_eq!(body["shipment"]["type"], 1);
            assert_eq!(body["settings"]["currency"], "MXN");
            assert_eq!(body["destination"]["state"], "JA");
            assert_eq!(body["destination"]["postalCode"], "44100");
            assert_eq!(body["origin"]["state"], "NL");
            assert_eq!(body["packages"][0]["weight"], 0.6);
            assert_eq!(body["packages"][0]["type"], "box");
            assert_eq!(body["packages"][0]["weightUnit"], "KG");
            assert_eq!(body["packages"][0]["dimensions"]["height"], 50.0);
        }
    }

    mod config {
        use super::*;

        #[test]
        fn rate_endpoint_joins_slashes() {
            let config = EnviaConfig::new("https://api.example.com/", BearerToken::new("t"));
            assert_eq!(config.rate_endpoint(), "https://api.example.com/ship/rate/");
            let config = config.with_rate_path("v2/rate");
            assert_eq!(config.rate_endpoint(), "https://api.example.com/v2/rate");
        }

        #[test]
        fn debug_hides_token() {
            let config = EnviaConfig::new(DEFAULT_BASE_URL, BearerToken::new("s3cr3t"));
            assert!(!format!("{:?}", config).contains("s3cr3t"));
        }
    }

    mod http {
        use super::*;

        fn adapter_for(server: &MockServer, carrier: &str) -> EnviaAdapter {
            let config = EnviaConfig::new(server.uri(), BearerToken::new("test-token"));
            EnviaAdapter::new(CarrierId::new(carrier), &config).unwrap()
        }

        fn deadline(ms: u64) -> Instant {
            Instant::now() + Duration::from_millis(ms)
        }

        #[tokio::test]
        async fn quotes_on_success() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/ship/rate/"))
                .and(header("authorization", "Bearer test-token"))
                .and(body_partial_json(json!({"shipment": {"carrier": "dhl"}})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "meta": "rate",
                    "data": [{"carrier": "dhl", "service": "express", "totalPrice": 210}]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let adapter = adapter_for(&server, "dhl");
            let outcome = adapter.quote(&shipment(), deadline(2000)).await;
            assert_eq!(outcome.quote_list().len(), 1);
            assert_eq!(outcome.carrier_id().as_str(), "dhl");
        }

        #[tokio::test]
        async fn non_2xx_is_http_error() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
                .mount(&server)
                .await;

            let adapter = adapter_for(&server, "ups");
            let outcome = adapter.quote(&shipment(), deadline(2000)).await;
            assert_eq!(outcome.as_failure().unwrap().reason, FailureReason::http_error(401));
        }

        #[tokio::test]
        async fn slow_carrier_times_out_at_deadline() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"meta": "rate", "data": []}))
                        .set_delay(Duration::from_millis(1000)),
                )
                .mount(&server)
                .await;

            let adapter = adapter_for(&server, "estafeta");
            let started = Instant::now();
            let outcome = adapter.quote(&shipment(), deadline(100)).await;
            assert_eq!(outcome.as_failure().unwrap().reason, FailureReason::Timeout);
            assert!(started.elapsed() < Duration::from_millis(800));
        }

        #[tokio::test]
        async fn non_json_body_is_malformed() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .mount(&server)
                .await;

            let adapter = adapter_for(&server, "redpack");
            let outcome = adapter.quote(&shipment(), deadline(2000)).await;
            assert_eq!(outcome.as_failure().unwrap().reason.kind(), "malformed_response");
        }
    }
}
