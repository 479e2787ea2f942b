//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedCpClient;
use crate::extract::Extractor;
use crate::stations::StationTable;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached results page client
    pub client: Arc<CachedCpClient>,

    /// Station name lookup
    pub stations: Arc<StationTable>,

    /// Journey extractor
    pub extractor: Arc<Extractor>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(client: CachedCpClient, stations: StationTable, extractor: Extractor) -> Self {
        Self {
            client: Arc::new(client),
            stations: Arc::new(stations),
            extractor: Arc::new(extractor),
        }
    }
}
