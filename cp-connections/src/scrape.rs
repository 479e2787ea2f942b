//! Fetch-and-extract pipeline.
//!
//! Ties the client, the optional disk cache and the extractor together:
//! query → page bytes (cached or fetched) → document → journeys.

use tracing::{info, warn};

use crate::cache::PageCache;
use crate::client::CpClient;
use crate::document::Document;
use crate::error::ScrapeError;
use crate::extract::{Extraction, Extractor};
use crate::query::ConnectionQuery;

/// Runs queries end to end.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: CpClient,
    cache: Option<PageCache>,
    extractor: Extractor,
}

impl Scraper {
    /// Create a scraper without a disk cache.
    pub fn new(client: CpClient, extractor: Extractor) -> Self {
        Self {
            client,
            cache: None,
            extractor,
        }
    }

    /// Keep fetched pages in `cache`.
    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Raw page for `query`, from the cache when fresh.
    ///
    /// A page that cannot be written to the cache is still returned.
    pub async fn page(&self, query: &ConnectionQuery) -> Result<Vec<u8>, ScrapeError> {
        if let Some(page) = self.cache.as_ref().and_then(|c| c.load(query)) {
            return Ok(page);
        }

        let page = self.client.fetch(query).await?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(query, &page)
        {
            warn!(error = %e, "Failed to cache results page");
        }

        Ok(page)
    }

    /// Extract journeys from already-fetched page bytes.
    pub fn extract(&self, page: &[u8]) -> Result<Extraction, ScrapeError> {
        let doc = Document::parse(page)?;
        Ok(self.extractor.extract(&doc))
    }

    /// Fetch (or load) the page for `query` and extract its journeys.
    pub async fn search(&self, query: &ConnectionQuery) -> Result<Extraction, ScrapeError> {
        let page = self.page(query).await?;
        let extraction = self.extract(&page)?;
        info!(
            %query,
            journeys = extraction.journeys.len(),
            skipped = extraction.skipped.len(),
            "Search complete"
        );
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PageCacheConfig;
    use crate::client::CpConfig;
    use crate::query::TransportMode;
    use tempfile::tempdir;

    fn scraper() -> Scraper {
        let client = CpClient::new(CpConfig::new().with_base_url("http://127.0.0.1:9")).unwrap();
        Scraper::new(client, Extractor::default())
    }

    #[test]
    fn extract_rejects_binary() {
        let err = scraper().extract(b"\x00\x01").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn extract_empty_page() {
        let extraction = scraper().extract(b"<html><body></body></html>").unwrap();
        assert!(extraction.is_empty());
    }

    #[tokio::test]
    async fn fresh_cached_page_skips_network() {
        let dir = tempdir().unwrap();
        let cache = PageCache::new(PageCacheConfig::new(dir.path()));
        let query = ConnectionQuery::new("A", "B", TransportMode::Train).unwrap();
        cache.save(&query, b"<div class=\"connection-list\"></div>").unwrap();

        // The client points at a closed port; only the cache can answer.
        let scraper = scraper().with_cache(cache);
        let extraction = scraper.search(&query).await.unwrap();
        assert!(extraction.is_empty());
    }
}
