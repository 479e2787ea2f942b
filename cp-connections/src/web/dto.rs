//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::extract::{Extraction, SkippedEntry};
use crate::query::ConnectionQuery;
use crate::record::JourneyRecord;

/// Request to search for connections.
#[derive(Debug, Deserialize)]
pub struct ConnectionsRequest {
    /// Departure station name or identifier
    pub from: String,

    /// Arrival station name or identifier
    pub to: String,

    /// Transport mode (defaults to train + bus)
    pub mode: Option<String>,
}

/// Journeys found for a query.
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    /// The resolved query
    pub query: ConnectionQuery,

    /// Journeys in page order
    pub journeys: Vec<JourneyRecord>,

    /// Entries that could not be read
    pub skipped: Vec<SkippedEntry>,
}

impl ConnectionsResponse {
    pub fn new(query: ConnectionQuery, extraction: Extraction) -> Self {
        Self {
            query,
            journeys: extraction.journeys,
            skipped: extraction.skipped,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
