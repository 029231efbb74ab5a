//! Directions HTTP client.
//!
//! Fetches transit directions between two places and decodes the
//! response into candidate routes.

use crate::domain::Route;

use super::convert::decode_routes;
use super::error::DirectionsError;
use super::types::DirectionsResponse;

/// Default base URL for the directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key, passed as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
///
/// Queries are pinned to transit directions by bus; origin and
/// destination are free-form place strings passed through untouched.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch candidate bus routes between two places.
    ///
    /// Returns one decoded route per candidate leg in the response.
    /// Candidates that fail to decode are excluded; the call fails only
    /// on transport errors, malformed JSON, or when no candidate at all
    /// survived the decode.
    pub async fn fetch_routes(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Route>, DirectionsError> {
        let response = self.fetch_raw(origin, destination).await?;
        Ok(decode_routes(&response)?)
    }

    /// Fetch the raw directions response (for debugging/testing).
    pub async fn fetch_raw(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let url = format!("{}/maps/api/directions/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "transit"),
                ("transit_mode", "bus"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
