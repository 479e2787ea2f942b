//! Station lookup error types.

use std::path::PathBuf;

/// Errors from the station table.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Name not present in the table
    #[error("unknown station: {0}")]
    Unknown(String),

    /// Station file could not be read
    #[error("failed to read station file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Station file is not a JSON object of strings
    #[error("invalid station file {path}: {message}")]
    Json { path: PathBuf, message: String },
}
