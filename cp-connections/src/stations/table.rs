//! Station name → identifier table.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::error::StationError;

/// Built-in entries: (name people use, identifier the site expects).
const BUILTIN: &[(&str, &str)] = &[
    ("BA hl.st.", "Bratislava hl.st."),
    ("Bratislava hl.st.", "Bratislava hl.st."),
    ("BA Petržalka", "Bratislava-Petržalka"),
    ("BA Nové Mesto", "Bratislava-Nové Mesto"),
    ("Miloslavov", "Miloslavov"),
    ("Senec", "Senec"),
    ("Trnava", "Trnava"),
    ("Galanta", "Galanta"),
    ("Nové Zámky", "Nové Zámky"),
    ("Komárno", "Komárno"),
    ("Žilina", "Žilina"),
    ("Košice", "Košice"),
];

/// Station name lookup table.
#[derive(Debug, Clone)]
pub struct StationTable {
    entries: BTreeMap<String, String>,
}

impl StationTable {
    /// Table with the built-in entries only.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect();
        Self { entries }
    }

    /// Table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add entries from a JSON string of the form `{"name": "identifier"}`.
    ///
    /// Entries override existing ones with the same name.
    pub fn extend_from_json(&mut self, json: &str, path: &Path) -> Result<usize, StationError> {
        let extra: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| StationError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let count = extra.len();
        self.entries.extend(extra);
        Ok(count)
    }

    /// Built-in table extended with the entries in the JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::builtin();
        let count = table.extend_from_json(&json, path)?;
        debug!(path = %path.display(), count, "Loaded station file");
        Ok(table)
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.entries.insert(name.into(), id.into());
    }

    /// Look up the identifier for `name`.
    ///
    /// Exact matches win; otherwise a case-insensitive match is accepted.
    pub fn resolve(&self, name: &str) -> Result<&str, StationError> {
        let name = name.trim();
        if let Some(id) = self.entries.get(name) {
            return Ok(id);
        }

        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == lower)
            .map(|(_, id)| id.as_str())
            .ok_or_else(|| StationError::Unknown(name.to_string()))
    }

    /// Like [`resolve`](Self::resolve), but unknown names are passed
    /// through unchanged. The site accepts plain station names.
    pub fn resolve_or_verbatim<'a>(&'a self, name: &'a str) -> &'a str {
        self.resolve(name).unwrap_or_else(|_| name.trim())
    }

    /// All (name, identifier) pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of stations in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_resolves_short_names() {
        let table = StationTable::builtin();
        assert_eq!(table.resolve("BA hl.st.").unwrap(), "Bratislava hl.st.");
        assert_eq!(table.resolve("Miloslavov").unwrap(), "Miloslavov");
    }

    #[test]
    fn resolve_is_case_insensitive_fallback() {
        let table = StationTable::builtin();
        assert_eq!(table.resolve("  ba HL.ST. ").unwrap(), "Bratislava hl.st.");
        assert_eq!(table.resolve("žilina").unwrap(), "Žilina");
    }

    #[test]
    fn unknown_station_is_error() {
        let table = StationTable::builtin();
        let err = table.resolve("Atlantis").unwrap_err();
        assert!(matches!(err, StationError::Unknown(ref n) if n == "Atlantis"));
    }

    #[test]
    fn verbatim_fallback() {
        let table = StationTable::builtin();
        assert_eq!(table.resolve_or_verbatim("BA hl.st."), "Bratislava hl.st.");
        assert_eq!(table.resolve_or_verbatim(" Pezinok "), "Pezinok");
    }

    #[test]
    fn load_extends_builtin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, r#"{"PK": "Pezinok", "Senec": "Senec zast."}"#).unwrap();

        let table = StationTable::load(&path).unwrap();
        assert_eq!(table.resolve("PK").unwrap(), "Pezinok");
        assert_eq!(table.resolve("Senec").unwrap(), "Senec zast.");
        assert_eq!(table.resolve("BA hl.st.").unwrap(), "Bratislava hl.st.");
        assert_eq!(table.len(), BUILTIN.len() + 1);
    }

    #[test]
    fn load_rejects_non_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, r#"["Senec"]"#).unwrap();

        assert!(matches!(
            StationTable::load(&path).unwrap_err(),
            StationError::Json { .. }
        ));
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            StationTable::load("/nonexistent/stations.json").unwrap_err(),
            StationError::Io { .. }
        ));
    }

    #[test]
    fn iter_is_sorted() {
        let mut table = StationTable::empty();
        table.insert("b", "2");
        table.insert("a", "1");
        let names: Vec<_> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!table.is_empty());
    }
}
