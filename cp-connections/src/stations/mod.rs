//! Station name lookup.
//!
//! Maps the station names people type to the identifiers the results page
//! expects. A small built-in table covers common stations; more entries can
//! be loaded from a JSON file.

mod error;
mod table;

pub use error::StationError;
pub use table::StationTable;
