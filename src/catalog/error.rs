//! Scene catalog errors.

use std::path::PathBuf;

/// Errors that can occur while building or loading a scene catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Catalog contains no scenes")]
    Empty,

    #[error("Scene #{index} has a blank id")]
    BlankId { index: usize },

    #[error("Scene id '{id}' appears more than once")]
    DuplicateId { id: String },

    #[error("Scene '{id}' has a zero duration (duration_ms must be positive)")]
    ZeroDuration { id: String },
}
