// SPDX-License-Identifier: MIT

//! Google Geocoding API client.
//!
//! Resolves free-form addresses to coordinates. Transient failures
//! (transport errors, 5xx, OVER_QUERY_LIMIT) are retried with a linear
//! backoff; definitive provider answers are not retried.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;
use crate::models::Coordinates;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(300);

/// Errors from the geocoding provider.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Transport(String),
    #[error("geocoding returned {status}: {message}")]
    Provider { status: String, message: String },
    #[error("no geocoding results for \"{0}\"")]
    NoResults(String),
}

impl From<GeocodeError> for AppError {
    fn from(err: GeocodeError) -> Self {
        match err {
            // An address the provider cannot resolve is the caller's problem.
            GeocodeError::NoResults(address) => {
                AppError::BadRequest(format!("Could not find a location for \"{address}\""))
            }
            other => AppError::MapsApi(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeReply {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

/// Google Geocoding API client.
#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client against a custom endpoint (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Resolve an address to coordinates.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.geocode_once(address).await {
                Ok(coords) => return Ok(coords),
                Err(err) if retryable(&err) && attempt < MAX_ATTEMPTS => {
                    tracing::debug!(address, attempt, error = %err, "Geocoding attempt failed, retrying");
                    tokio::time::sleep(RETRY_BASE_DELAY * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn geocode_once(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .http
            .get(&self.base_url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(GeocodeError::Transport(format!("server error: {status}")));
        }
        if !status.is_success() {
            return Err(GeocodeError::Provider {
                status: status.to_string(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let reply: GeocodeReply = response
            .json()
            .await
            .map_err(|e| GeocodeError::Transport(format!("invalid geocoding reply: {e}")))?;

        match reply.status.as_str() {
            "OK" => reply
                .results
                .first()
                .map(|result| result.geometry.location)
                .ok_or_else(|| GeocodeError::NoResults(address.to_string())),
            "ZERO_RESULTS" => Err(GeocodeError::NoResults(address.to_string())),
            status => Err(GeocodeError::Provider {
                status: status.to_string(),
                message: reply.error_message.unwrap_or_default(),
            }),
        }
    }
}

fn retryable(err: &GeocodeError) -> bool {
    match err {
        GeocodeError::Transport(_) => true,
        GeocodeError::Provider { status, .. } => status == "OVER_QUERY_LIMIT",
        GeocodeError::NoResults(_) => false,
    }
}
