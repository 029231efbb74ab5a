//! Mock stop-catalogue client for testing without API access.
//!
//! Loads catalogue responses from JSON files and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{OperatorCode, Stop};

use super::client::{StopsResponse, convert_stops};
use super::error::StopError;
use super::fetch::StopSource;

/// Mock stop-catalogue client that serves data from JSON files.
///
/// This is useful for development and testing without real API
/// credentials. Mock catalogues are per-operator; line identifiers are
/// accepted and ignored.
#[derive(Clone)]
pub struct MockStopClient {
    /// Pre-loaded catalogues, keyed by operator code.
    catalogues: Arc<RwLock<HashMap<OperatorCode, Vec<Stop>>>>,
}

impl MockStopClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{OPERATOR}.json` (e.g. `SC.json`, `AC.json`),
    /// each containing a raw catalogue response.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StopError> {
        let data_dir = data_dir.as_ref();
        let mut catalogues = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| StopError::Api {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| StopError::Api {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract the operator from the filename (e.g. "SC.json" -> "SC")
            let operator_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| StopError::Api {
                        status: 0,
                        message: format!("Invalid filename: {:?}", path),
                    })?;

            let operator = OperatorCode::parse(operator_str).map_err(|_| StopError::Api {
                status: 0,
                message: format!("Invalid operator code in filename: {}", operator_str),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| StopError::Api {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let response: StopsResponse =
                serde_json::from_str(&json).map_err(|e| StopError::Api {
                    status: 0,
                    message: format!("Failed to parse {:?}: {}", path, e),
                })?;

            catalogues.insert(operator, convert_stops(&response)?);
        }

        if catalogues.is_empty() {
            return Err(StopError::Api {
                status: 0,
                message: format!("No mock catalogue files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            catalogues: Arc::new(RwLock::new(catalogues)),
        })
    }

    /// Fetch the catalogue for an operator.
    ///
    /// Mimics the real `StopClient::fetch_stops` interface. The line
    /// identifier is ignored - mock catalogues are static per operator.
    pub async fn fetch_stops(
        &self,
        operator: &OperatorCode,
        _line: Option<&str>,
    ) -> Result<Vec<Stop>, StopError> {
        let catalogues = self.catalogues.read().await;

        catalogues.get(operator).cloned().ok_or_else(|| {
            let available: Vec<_> = catalogues.keys().map(|o| o.as_str().to_string()).collect();
            StopError::Api {
                status: 404,
                message: format!(
                    "No mock catalogue for operator {}. Available: {:?}",
                    operator.as_str(),
                    available
                ),
            }
        })
    }

    /// List operators present in the mock data.
    pub async fn available_operators(&self) -> Vec<OperatorCode> {
        let catalogues = self.catalogues.read().await;
        catalogues.keys().copied().collect()
    }

    /// Reload mock data from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), StopError> {
        let fresh = Self::new(data_dir)?;
        let mut catalogues = self.catalogues.write().await;
        let fresh_catalogues = fresh.catalogues.read().await;
        *catalogues = fresh_catalogues.clone();
        Ok(())
    }
}

impl StopSource for MockStopClient {
    async fn stops_for_line(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> Result<Vec<Stop>, StopError> {
        self.fetch_stops(operator, line).await
    }
}
