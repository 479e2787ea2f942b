//! Transit connection scraper.
//!
//! Fetches a cp.sk results page for a (from, to, mode) query and extracts
//! the listed journeys: times, delays, platforms and carrier.

pub mod cache;
pub mod client;
pub mod document;
pub mod error;
pub mod extract;
pub mod query;
pub mod record;
pub mod render;
pub mod scrape;
pub mod stations;
pub mod web;

pub use error::ScrapeError;
pub use extract::{Extraction, Extractor, extract, extract_bytes};
pub use query::{ConnectionQuery, TransportMode};
pub use record::{JourneyRecord, Stop};
