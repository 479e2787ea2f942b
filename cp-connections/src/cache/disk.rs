//! Disk cache for raw results pages.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::query::ConnectionQuery;

/// Default cache TTL: 5 minutes. Delays go stale quickly.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Errors from writing the disk cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration for the page disk cache.
#[derive(Debug, Clone)]
pub struct PageCacheConfig {
    /// Directory holding one file per query.
    pub dir: PathBuf,
    /// How long a saved page remains valid.
    pub ttl: Duration,
}

impl PageCacheConfig {
    /// Create a new cache config with the given directory and default TTL.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for PageCacheConfig {
    fn default() -> Self {
        Self::new(".cp-cache")
    }
}

/// Disk cache for results pages, keyed by query.
#[derive(Debug, Clone)]
pub struct PageCache {
    config: PageCacheConfig,
}

impl PageCache {
    /// Create a new page cache with the given config.
    pub fn new(config: PageCacheConfig) -> Self {
        Self { config }
    }

    /// File that holds the page for `query`.
    pub fn path_for(&self, query: &ConnectionQuery) -> PathBuf {
        self.config.dir.join(format!("{}.html", query.cache_key()))
    }

    /// Try to load the page for `query`.
    ///
    /// Returns `None` if the file doesn't exist, can't be read, or is
    /// older than the TTL.
    pub fn load(&self, query: &ConnectionQuery) -> Option<Vec<u8>> {
        let path = self.path_for(query);
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        // A timestamp in the future counts as fresh.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.config.ttl {
            debug!(path = %path.display(), age_secs = age.as_secs(), "Cached page expired");
            return None;
        }

        let bytes = std::fs::read(&path).ok()?;
        debug!(path = %path.display(), bytes = bytes.len(), "Loaded cached page");
        Some(bytes)
    }

    /// Save the page for `query`.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save(&self, query: &ConnectionQuery, page: &[u8]) -> Result<(), CacheError> {
        let dir = &self.config.dir;
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| CacheError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        let path = self.path_for(query);
        std::fs::write(&path, page).map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = page.len(), "Saved page to cache");
        Ok(())
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TransportMode;
    use tempfile::tempdir;

    fn query(from: &str, to: &str) -> ConnectionQuery {
        ConnectionQuery::new(from, to, TransportMode::Train).unwrap()
    }

    #[test]
    fn save_and_load_page() {
        let dir = tempdir().unwrap();
        let cache = PageCache::new(PageCacheConfig::new(dir.path()));
        let q = query("Bratislava hl.st.", "Miloslavov");

        cache.save(&q, b"<html>page</html>").unwrap();
        assert_eq!(cache.load(&q).unwrap(), b"<html>page</html>");
    }

    #[test]
    fn queries_do_not_share_entries() {
        let dir = tempdir().unwrap();
        let cache = PageCache::new(PageCacheConfig::new(dir.path()));

        cache.save(&query("A", "B"), b"ab").unwrap();
        assert!(cache.load(&query("B", "A")).is_none());

        let bus = ConnectionQuery::new("A", "B", TransportMode::Bus).unwrap();
        assert!(cache.load(&bus).is_none());
    }

    #[test]
    fn expired_page_returns_none() {
        let dir = tempdir().unwrap();
        let config = PageCacheConfig::new(dir.path()).with_ttl(Duration::from_secs(0));
        let cache = PageCache::new(config);
        let q = query("A", "B");

        cache.save(&q, b"x").unwrap();

        // With 0 TTL, the page is immediately expired
        assert!(cache.load(&q).is_none());
    }

    #[test]
    fn missing_page_returns_none() {
        let cache = PageCache::new(PageCacheConfig::new("/nonexistent/path/cache"));
        assert!(cache.load(&query("A", "B")).is_none());
    }

    #[test]
    fn creates_cache_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("dir");
        let cache = PageCache::new(PageCacheConfig::new(&nested));
        let q = query("A", "B");

        cache.save(&q, b"x").unwrap();
        assert!(cache.path_for(&q).exists());
        assert_eq!(cache.dir(), nested.as_path());
    }

    #[test]
    fn default_config() {
        let config = PageCacheConfig::default();
        assert_eq!(config.dir, PathBuf::from(".cp-cache"));
        assert_eq!(config.ttl, Duration::from_secs(300));
    }
}
