//! Stop-catalogue HTTP client.
//!
//! Queries the per-line stop catalogue service. Catalogue coordinates
//! arrive encoded as decimal strings and are parsed at the decode
//! boundary.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::domain::{Coordinate, OperatorCode, Stop};

use super::error::StopError;
use super::fetch::StopSource;

/// Default base URL for the stop-catalogue API.
const DEFAULT_BASE_URL: &str = "https://api.511.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Response wrapper for a stop-catalogue query.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsResponse {
    #[serde(rename = "Contents")]
    pub contents: StopsContents,
}

/// Second-level wrapper around the catalogue payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsContents {
    #[serde(rename = "dataObjects")]
    pub data_objects: StopsData,
}

/// The catalogue payload: scheduled stop points in timetable order.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsData {
    #[serde(rename = "ScheduledStopPoint")]
    pub stop_points: Vec<StopPointDto>,
}

/// One scheduled stop point.
#[derive(Debug, Clone, Deserialize)]
pub struct StopPointDto {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Location")]
    pub location: StopLocationDto,
}

/// Stop coordinates as sent on the wire: decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct StopLocationDto {
    #[serde(rename = "Longitude")]
    pub longitude: String,

    #[serde(rename = "Latitude")]
    pub latitude: String,
}

/// Convert a catalogue response to domain stops.
///
/// Fails on the first coordinate that does not parse as a decimal
/// number; order is preserved.
pub fn convert_stops(response: &StopsResponse) -> Result<Vec<Stop>, StopError> {
    response
        .contents
        .data_objects
        .stop_points
        .iter()
        .map(convert_stop_point)
        .collect()
}

fn convert_stop_point(point: &StopPointDto) -> Result<Stop, StopError> {
    let lat = parse_coordinate(&point.location.latitude)?;
    let lng = parse_coordinate(&point.location.longitude)?;

    Ok(Stop {
        name: point.name.clone(),
        position: Coordinate { lat, lng },
    })
}

fn parse_coordinate(value: &str) -> Result<f64, StopError> {
    value.parse().map_err(|_| StopError::InvalidCoordinate {
        value: value.to_string(),
    })
}

/// Configuration for the stop-catalogue client.
#[derive(Debug, Clone)]
pub struct StopClientConfig {
    /// API key, passed as the `api_key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StopClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Stop-catalogue API client.
///
/// The orchestrator issues one request per bus line concurrently; a
/// semaphore bounds how many are in flight at once.
#[derive(Debug, Clone)]
pub struct StopClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl StopClient {
    /// Create a new stop-catalogue client with the given configuration.
    pub fn new(config: StopClientConfig) -> Result<Self, StopError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the full ordered stop catalogue for one operator line.
    ///
    /// # Arguments
    ///
    /// * `operator` - Operator code scoping the query to one agency
    /// * `line` - Line identifier; omit to fetch all of the operator's
    ///   stops
    pub async fn fetch_stops(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> Result<Vec<Stop>, StopError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| StopError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })?;

        let url = format!("{}/transit/stops", self.base_url);

        let mut query = vec![
            ("api_key", self.api_key.as_str()),
            ("operator_id", operator.as_str()),
        ];
        if let Some(line) = line {
            query.push(("line_id", line));
        }

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StopError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StopError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StopError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let decoded: StopsResponse =
            serde_json::from_str(&body).map_err(|e| StopError::Json {
                message: e.to_string(),
            })?;

        convert_stops(&decoded)
    }
}

impl StopSource for StopClient {
    async fn stops_for_line(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> Result<Vec<Stop>, StopError> {
        self.fetch_stops(operator, line).await
    }
}
