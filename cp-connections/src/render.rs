//! Presentation of journey records.
//!
//! Two renderings: a plain-text form via `Display`, and askama HTML pages.
//! An absent delay is shown as [`NO_DELAY`]; the record itself keeps `None`.

use std::fmt;

use askama::Template;

use crate::record::{JourneyRecord, Stop};

/// Shown in place of an absent delay.
pub const NO_DELAY: &str = "No delay";

/// `time - name - platform - marker`, skipping absent parts.
fn stop_summary(stop: &Stop) -> String {
    [
        Some(stop.time()),
        stop.name(),
        stop.platform(),
        stop.on_request(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" - ")
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stop_summary(self))
    }
}

impl fmt::Display for JourneyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.id())?;
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", self.owner())?;
        writeln!(f, "{} - {}", self.departure_date(), self.departure_time())?;
        writeln!(f, "Duration: {}", self.total_duration())?;
        writeln!(f, "Distance: {}", self.total_distance())?;
        writeln!(f, "Delay: {}", self.delay().unwrap_or(NO_DELAY))?;
        writeln!(f, "{}", self.departure())?;
        write!(f, "{}", self.arrival())
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Journey view model for templates.
#[derive(Debug, Clone)]
pub struct JourneyView {
    pub share_url: String,
    pub id: String,
    pub title: String,
    pub owner: String,
    pub departure_date: String,
    pub departure_time: String,
    pub total_duration: String,
    pub total_distance: String,
    pub delay: String,
    pub is_delayed: bool,
    pub departure: String,
    pub arrival: String,
}

impl JourneyView {
    /// Create from a record.
    pub fn from_record(record: &JourneyRecord) -> Self {
        Self {
            share_url: record.share_url().to_string(),
            id: record.id().to_string(),
            title: record.title().to_string(),
            owner: record.owner().to_string(),
            departure_date: record.departure_date().to_string(),
            departure_time: record.departure_time().to_string(),
            total_duration: record.total_duration().to_string(),
            total_distance: record.total_distance().to_string(),
            delay: record.delay().unwrap_or(NO_DELAY).to_string(),
            is_delayed: record.delay().is_some(),
            departure: stop_summary(record.departure()),
            arrival: stop_summary(record.arrival()),
        }
    }
}

// ============================================================================
// Page Templates
// ============================================================================

/// Standalone styled page for one journey.
#[derive(Template)]
#[template(path = "journey.html")]
pub struct JourneyPage {
    pub journey: JourneyView,
}

impl JourneyPage {
    pub fn new(record: &JourneyRecord) -> Self {
        Self {
            journey: JourneyView::from_record(record),
        }
    }
}

/// All journeys found for one query.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub query: String,
    pub journeys: Vec<JourneyView>,
    pub skipped: usize,
}

impl ResultsPage {
    pub fn new(query: impl Into<String>, records: &[JourneyRecord], skipped: usize) -> Self {
        Self {
            query: query.into(),
            journeys: records.iter().map(JourneyView::from_record).collect(),
            skipped,
        }
    }
}
