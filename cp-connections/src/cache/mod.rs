//! Caching for raw results pages.
//!
//! Two layers, used by different front ends:
//! - [`PageCache`] keeps pages on disk between CLI runs.
//! - [`CachedCpClient`] keeps recent pages in memory for the server.
//!
//! Both store the raw bytes, not the extracted journeys, so a cached page
//! can be re-extracted after the extractor changes.

mod disk;
mod memory;

pub use disk::{CacheError, PageCache, PageCacheConfig};
pub use memory::{CacheConfig, CachedCpClient};
