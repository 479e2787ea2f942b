//! Top-level error type for a scrape.

use crate::client::FetchError;
use crate::document::ParseError;
use crate::query::QueryError;
use crate::stations::StationError;

/// Anything that aborts a whole scrape.
///
/// Per-entry layout problems are not here: they are recovered by skipping
/// the entry and show up in [`Extraction::skipped`](crate::extract::Extraction).
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The query is invalid (e.g. same departure and arrival)
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A station name could not be resolved
    #[error(transparent)]
    Station(#[from] StationError),

    /// The results page could not be downloaded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The downloaded bytes are not a document
    #[error("unreadable results page: {0}")]
    Parse(#[from] ParseError),
}
