//! # HTTP Client Utilities
//!
//! Shared HTTP client for carrier adapters.
//!
//! Wraps `reqwest` with:
//! - A per-request timeout as a backstop to the aggregation deadline
//! - Bearer authentication injected as a sensitive default header
//! - Mapping of transport errors and status codes to [`CarrierError`]
//!
//! # Examples
//!
//! ```ignore
//! use ship_rates::infrastructure::carriers::http_client::{BearerToken, HttpClient};
//!
//! let client = HttpClient::new(5000, &BearerToken::new("secret"))?;
//! let envelope: serde_json::Value = client.post(url, &body).await?;
//! ```

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Bearer credential for a carrier API.
///
/// `Debug` and `Display` never print the secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns true if no token is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn header_value(&self) -> CarrierResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0.trim()))
            .map_err(|_| CarrierError::internal_error("bearer token is not a valid header"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// HTTP client wrapper for carrier adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client that authenticates every request with `token`.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the token is not a valid
    /// header value or the client cannot be built.
    pub fn new(timeout_ms: u64, token: &BearerToken) -> CarrierResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token.header_value()?);

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                CarrierError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a POST request with JSON body and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// - `CarrierError::Timeout` / `Connection` if the request fails
    /// - `CarrierError::HttpStatus` on a non-2xx status
    /// - `CarrierError::ProtocolError` if the body is not the expected JSON
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> CarrierResult<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> CarrierResult<T> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<T>(&bytes)
            .map_err(|e| CarrierError::protocol_error(format!("Failed to parse response: {}", e)))
    } else {
        let error_body = response.text().await.unwrap_or_default();
        Err(CarrierError::http_status(status.as_u16(), &error_body))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> CarrierError {
    if error.is_timeout() {
        CarrierError::timeout("Request timed out")
    } else if error.is_connect() {
        CarrierError::connection(format!("Connection failed: {}", error))
    } else {
        CarrierError::connection(format!("HTTP request failed: {}", error))
    }
}
