//! Journey record types.
//!
//! A `JourneyRecord` is one connection option scraped from a results page.
//! Records are built once by the extractor and are read-only afterwards.

use serde::Serialize;

/// One end of a journey: the stop where it starts or ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub(crate) time: String,
    pub(crate) name: Option<String>,
    pub(crate) platform: Option<String>,
    pub(crate) on_request: Option<String>,
}

impl Stop {
    /// Scheduled time at this stop, as displayed by the site.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Station name, if the layout showed one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Platform or track label.
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Marker text shown when this is a request stop.
    pub fn on_request(&self) -> Option<&str> {
        self.on_request.as_deref()
    }
}

/// A single scraped journey.
///
/// Dates, times, durations and distances are kept as the site displays
/// them. The source format is locale-specific and no unit or calendar
/// normalization is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyRecord {
    pub(crate) share_url: String,
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) owner: String,
    pub(crate) departure_date: String,
    pub(crate) departure_time: String,
    pub(crate) total_duration: String,
    pub(crate) total_distance: String,
    pub(crate) delay: Option<String>,
    pub(crate) departure: Stop,
    pub(crate) arrival: Stop,
}

impl JourneyRecord {
    /// Canonical link to this journey on the site.
    pub fn share_url(&self) -> &str {
        &self.share_url
    }

    /// Carrier-assigned line or trip identifier (e.g. "Os 3010").
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full line description.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Operating carrier.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn departure_date(&self) -> &str {
        &self.departure_date
    }

    pub fn departure_time(&self) -> &str {
        &self.departure_time
    }

    pub fn total_duration(&self) -> &str {
        &self.total_duration
    }

    pub fn total_distance(&self) -> &str {
        &self.total_distance
    }

    /// Delay description. `None` means no delay is known.
    pub fn delay(&self) -> Option<&str> {
        self.delay.as_deref()
    }

    /// Stop where this journey segment starts.
    pub fn departure(&self) -> &Stop {
        &self.departure
    }

    /// Stop where this journey segment ends.
    pub fn arrival(&self) -> &Stop {
        &self.arrival
    }

    pub fn departure_stop_time(&self) -> &str {
        self.departure.time()
    }

    pub fn arrival_stop_time(&self) -> &str {
        self.arrival.time()
    }

    pub fn departure_stop_name(&self) -> Option<&str> {
        self.departure.name()
    }

    pub fn arrival_stop_name(&self) -> Option<&str> {
        self.arrival.name()
    }

    pub fn departure_platform(&self) -> Option<&str> {
        self.departure.platform()
    }

    pub fn arrival_platform(&self) -> Option<&str> {
        self.arrival.platform()
    }

    pub fn departure_on_request(&self) -> Option<&str> {
        self.departure.on_request()
    }

    pub fn arrival_on_request(&self) -> Option<&str> {
        self.arrival.on_request()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_accessors_read_through_stops() {
        let r = fixtures::record();
        assert_eq!(r.departure_stop_time(), "14:05");
        assert_eq!(r.arrival_stop_time(), "14:27");
        assert_eq!(r.departure_stop_name(), Some("Bratislava hl.st."));
        assert_eq!(r.departure_platform(), Some("3"));
        assert_eq!(r.arrival_platform(), None);
        assert_eq!(r.departure_on_request(), None);
        assert_eq!(r.arrival_on_request(), Some("x"));
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let r = fixtures::record();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["id"], "Os 3010");
        assert!(json["delay"].is_null());
        assert_eq!(json["departure"]["platform"], "3");
        assert!(json["arrival"]["platform"].is_null());
    }
}
