//! Caching layer for stop-catalogue responses.
//!
//! A single route query fans out one fetch per bus line, and repeated
//! queries tend to hit the same lines. Stop catalogues are near-static,
//! so the converted catalogue is cached per (operator, line) with a TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{OperatorCode, Stop};
use crate::stops::{StopClient, StopError, StopSource};

/// Cache key: (operator, optional line identifier).
type CatalogueKey = (OperatorCode, Option<String>);

/// Cached catalogue entry.
type CatalogueEntry = Arc<Vec<Stop>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached catalogues.
    pub ttl: Duration,

    /// Maximum number of cached catalogues.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 256,
        }
    }
}

/// Cache for converted stop catalogues.
pub struct StopCatalogueCache {
    catalogues: MokaCache<CatalogueKey, CatalogueEntry>,
}

impl StopCatalogueCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let catalogues = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { catalogues }
    }

    /// Get a cached catalogue.
    pub async fn get(&self, key: &CatalogueKey) -> Option<CatalogueEntry> {
        self.catalogues.get(key).await
    }

    /// Insert a catalogue into the cache.
    pub async fn insert(&self, key: CatalogueKey, entry: CatalogueEntry) {
        self.catalogues.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.catalogues.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.catalogues.invalidate_all();
    }
}

/// Stop-catalogue client with caching.
///
/// Wraps a `StopClient` and caches converted catalogue responses.
pub struct CachedStopClient {
    client: StopClient,
    cache: StopCatalogueCache,
}

impl CachedStopClient {
    /// Create a new cached client.
    pub fn new(client: StopClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: StopCatalogueCache::new(cache_config),
        }
    }

    /// Fetch a catalogue, using the cache if fresh.
    pub async fn fetch_stops(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> Result<CatalogueEntry, StopError> {
        let key = (*operator, line.map(str::to_string));

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let stops = self.client.fetch_stops(operator, line).await?;
        let entry = Arc::new(stops);

        self.cache.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &StopClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl StopSource for CachedStopClient {
    async fn stops_for_line(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> Result<Vec<Stop>, StopError> {
        let entry = self.fetch_stops(operator, line).await?;
        Ok(entry.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(900));
        assert_eq!(config.max_capacity, 256);
    }

    #[test]
    fn cache_creation() {
        let config = CacheConfig::default();
        let cache = StopCatalogueCache::new(&config);
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let cache = StopCatalogueCache::new(&CacheConfig::default());
        let operator = OperatorCode::parse("SC").unwrap();
        let key = (operator, Some("22".to_string()));

        assert!(cache.get(&key).await.is_none());

        let entry = Arc::new(vec![Stop {
            name: "Santa Clara & 1st".to_string(),
            position: Coordinate {
                lat: 37.33,
                lng: -121.89,
            },
        }]);
        cache.insert(key.clone(), entry).await;

        let cached = cache.get(&key).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Santa Clara & 1st");

        // A different line id is a different entry
        let other_key = (operator, Some("23".to_string()));
        assert!(cache.get(&other_key).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let cache = StopCatalogueCache::new(&CacheConfig::default());
        let key = (OperatorCode::parse("AC").unwrap(), None);

        cache.insert(key.clone(), Arc::new(Vec::new())).await;
        cache.invalidate_all();

        assert!(cache.get(&key).await.is_none());
    }
}
