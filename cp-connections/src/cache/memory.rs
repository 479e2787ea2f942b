//! In-memory cache in front of the results page client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::client::{CpClient, FetchError};
use crate::query::ConnectionQuery;

/// Cached page body.
type PageEntry = Arc<Vec<u8>>;

/// Configuration for the in-memory cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached pages.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 200,
        }
    }
}

/// Results page client with caching.
///
/// Wraps a `CpClient` and keeps recently fetched pages in memory.
pub struct CachedCpClient {
    client: CpClient,
    pages: MokaCache<ConnectionQuery, PageEntry>,
}

impl CachedCpClient {
    /// Create a new cached client.
    pub fn new(client: CpClient, config: &CacheConfig) -> Self {
        let pages = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, pages }
    }

    /// Get the page for `query`, using the cache if available.
    pub async fn fetch(&self, query: &ConnectionQuery) -> Result<PageEntry, FetchError> {
        if let Some(cached) = self.pages.get(query).await {
            debug!(%query, "Page cache hit");
            return Ok(cached);
        }

        let page = Arc::new(self.client.fetch(query).await?);
        self.pages.insert(query.clone(), page.clone()).await;

        Ok(page)
    }

    /// Access the underlying client for requests that bypass the cache.
    pub fn client(&self) -> &CpClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.pages.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.pages.invalidate_all();
    }
}
