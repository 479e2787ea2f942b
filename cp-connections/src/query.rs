//! Connection queries.
//!
//! A query names a departure station, an arrival station and a transport
//! mode, and knows how to turn itself into a results page URL.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default site root for results pages.
pub const DEFAULT_BASE_URL: &str = "http://www.cp.sk";

/// Errors raised before any network or parse work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Departure and arrival are the same station
    #[error("departure station cannot be the same as arrival station ({0})")]
    SameStations(String),

    /// A station identifier is empty
    #[error("{0} station must not be empty")]
    EmptyStation(&'static str),

    /// Transport mode string not recognised
    #[error("unknown transport mode: {0}")]
    UnknownMode(String),

    /// Base URL could not be combined with the query
    #[error("invalid base URL {base}: {message}")]
    InvalidBaseUrl { base: String, message: String },
}

/// Which timetable to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    Train,
    Bus,
    #[default]
    TrainBus,
}

impl TransportMode {
    /// All modes, in display order.
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::TrainBus,
    ];

    /// Path segment the site uses for this timetable.
    pub fn path_segment(&self) -> &'static str {
        match self {
            TransportMode::Train => "vlak",
            TransportMode::Bus => "bus",
            TransportMode::TrainBus => "vlakbus",
        }
    }

    /// English name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::TrainBus => "train-bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = QueryError;

    /// Accepts English names and the site's own path segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" | "vlak" => Ok(TransportMode::Train),
            "bus" => Ok(TransportMode::Bus),
            "train-bus" | "trainbus" | "train+bus" | "vlakbus" => Ok(TransportMode::TrainBus),
            _ => Err(QueryError::UnknownMode(s.to_string())),
        }
    }
}

/// A validated (from, to, mode) query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionQuery {
    from: String,
    to: String,
    mode: TransportMode,
}

impl ConnectionQuery {
    /// Create a query from station identifiers.
    ///
    /// Identifiers are opaque; they are compared exactly, after trimming.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        mode: TransportMode,
    ) -> Result<Self, QueryError> {
        let from = from.into().trim().to_string();
        let to = to.into().trim().to_string();

        if from.is_empty() {
            return Err(QueryError::EmptyStation("departure"));
        }
        if to.is_empty() {
            return Err(QueryError::EmptyStation("arrival"));
        }
        if from == to {
            return Err(QueryError::SameStations(from));
        }

        Ok(Self { from, to, mode })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Results page URL under `base`.
    ///
    /// `{base}/{mode}/spojenie/vysledky/?f={from}&t={to}&direct=true`
    pub fn url(&self, base: &str) -> Result<Url, QueryError> {
        let invalid = |message: String| QueryError::InvalidBaseUrl {
            base: base.to_string(),
            message,
        };

        let root = format!(
            "{}/{}/spojenie/vysledky/",
            base.trim_end_matches('/'),
            self.mode.path_segment()
        );

        let url = Url::parse_with_params(
            &root,
            &[
                ("f", self.from.as_str()),
                ("t", self.to.as_str()),
                ("direct", "true"),
            ],
        )
        .map_err(|e| invalid(e.to_string()))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_string()));
        }

        Ok(url)
    }

    /// Stable, filesystem-safe key for this query.
    ///
    /// ASCII alphanumerics are kept; every other byte is hex-escaped so
    /// distinct queries never share a key.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.mode.path_segment(),
            escape_key(&self.from),
            escape_key(&self.to)
        )
    }
}

impl fmt::Display for ConnectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.mode)
    }
}

fn escape_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() {
            out.push(b as char);
        } else {
            out.push_str(&format!("-{b:02x}"));
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Identical identifiers are always rejected.
        #[test]
        fn identical_stations_rejected(s in "[A-Za-z][A-Za-z .]{0,20}") {
            let err = ConnectionQuery::new(s.clone(), s, TransportMode::Train).unwrap_err();
            prop_assert!(matches!(err, QueryError::SameStations(_)), "unexpected error: {}", err);
        }

        /// Distinct non-blank identifiers are always accepted.
        #[test]
        fn distinct_stations_accepted(a in "[A-Za-z]{1,12}", b in "[A-Za-z]{1,12}") {
            prop_assume!(a != b);
            prop_assert!(ConnectionQuery::new(a, b, TransportMode::Bus).is_ok());
        }

        /// Distinct queries never share a cache key.
        #[test]
        fn cache_keys_distinct(a in "\\PC{1,8}", b in "\\PC{1,8}", c in "\\PC{1,8}") {
            let q1 = ConnectionQuery::new(a.clone(), b, TransportMode::Train);
            let q2 = ConnectionQuery::new(a, c, TransportMode::Train);
            if let (Ok(q1), Ok(q2)) = (q1, q2) {
                prop_assert_eq!(q1 == q2, q1.cache_key() == q2.cache_key());
            }
        }
    }
}
