//! Journey extraction from a parsed results page.
//!
//! The page lists journeys inside the first element whose class is exactly
//! `connection-list`. Each direct child with `connectionBox` in its id is one
//! journey entry. Entries are read through fixed-position accessors (see
//! [`layout`]) plus an attribute scan for station details (see [`station`]).
//!
//! An entry whose fixed positions are missing is skipped and recorded; the
//! remaining entries are still extracted.

mod error;
mod layout;
mod station;


pub use error::{LayoutMismatch, MismatchKind};
pub use layout::INLINE_OWNER_CLASS;
pub use station::StationLabels;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::document::{Document, Element, ParseError};
use crate::record::{JourneyRecord, Stop};

use layout::OwnerSource;

/// Class of the element holding the journey list.
pub const LIST_CLASS: &str = "connection-list";

/// Substring of a journey entry's id.
pub const ENTRY_ID_MARKER: &str = "connectionBox";

/// An entry that was skipped because its layout did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Position among journey entries (not among all children).
    pub index: usize,
    /// The entry's `id` attribute.
    pub entry_id: String,
    #[serde(serialize_with = "display")]
    pub error: LayoutMismatch,
}

fn display<S: Serializer>(err: &LayoutMismatch, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

/// Result of extracting one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Journeys in document order.
    pub journeys: Vec<JourneyRecord>,
    /// Entries that could not be read.
    pub skipped: Vec<SkippedEntry>,
}

impl Extraction {
    /// True when the page listed no readable journeys.
    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    /// Number of extracted journeys.
    pub fn len(&self) -> usize {
        self.journeys.len()
    }
}

/// Journey extractor for the results page layout.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    labels: StationLabels,
}

impl Extractor {
    /// Create an extractor using the given station detail labels.
    pub fn new(labels: StationLabels) -> Self {
        Self { labels }
    }

    /// Extract all journeys from `doc`.
    ///
    /// A document without a journey list yields an empty extraction.
    pub fn extract(&self, doc: &Document) -> Extraction {
        let mut extraction = Extraction::default();

        let Some(list) = find_list(doc) else {
            debug!("No journey list in document");
            return extraction;
        };

        let entries = list
            .children()
            .iter()
            .filter(|child| child.id().is_some_and(|id| id.contains(ENTRY_ID_MARKER)));

        for (index, entry) in entries.enumerate() {
            let entry_id = entry.id().unwrap_or_default();
            match self.extract_entry(entry) {
                Ok(record) => extraction.journeys.push(record),
                Err(error) => {
                    warn!(index, entry_id, error = %error, "Skipping journey entry");
                    extraction.skipped.push(SkippedEntry {
                        index,
                        entry_id: entry_id.to_string(),
                        error,
                    });
                }
            }
        }

        debug!(
            journeys = extraction.journeys.len(),
            skipped = extraction.skipped.len(),
            "Extraction complete"
        );

        extraction
    }

    /// Build one record from a journey entry element.
    pub fn extract_entry(&self, entry: &Element) -> Result<JourneyRecord, LayoutMismatch> {
        let share_url = layout::share_url(entry)?;
        let header = layout::header_block(entry)?;

        let details = layout::details_block(entry)?;
        let container = layout::title_container(details)?;
        let (id, title) = layout::line_title(container)?;
        let owner = OwnerSource::resolve(container)?.owner()?;
        let delay = layout::delay(details)?;

        let (from, to) = layout::track_block(details)?;
        let departure = self.stop(from);
        let arrival = self.stop(to);

        Ok(JourneyRecord {
            share_url,
            id,
            title,
            owner,
            departure_date: header.departure_date,
            departure_time: header.departure_time,
            total_duration: header.total_duration,
            total_distance: header.total_distance,
            delay,
            departure,
            arrival,
        })
    }

    fn stop(&self, side: layout::TrackSide<'_>) -> Stop {
        let details = station::station_details(side.station, &self.labels);
        Stop {
            time: side.time,
            name: details.name,
            platform: details.platform,
            on_request: details.on_request,
        }
    }
}

/// First element, depth-first, whose class is exactly [`LIST_CLASS`].
fn find_list(doc: &Document) -> Option<&Element> {
    doc.find_first(|el| el.class() == Some(LIST_CLASS))
}

/// Extract journeys with the default labels.
pub fn extract(doc: &Document) -> Extraction {
    Extractor::default().extract(doc)
}

/// Parse `bytes` and extract journeys with the default labels.
pub fn extract_bytes(bytes: &[u8]) -> Result<Extraction, ParseError> {
    let doc = Document::parse(bytes)?;
    Ok(extract(&doc))
}
