//! Error enum shared by the catalog and the command-line front end

use crate::clipboard::ClipboardError;
use crate::record::RecordId;
use thiserror::Error;

/// Catalog errors
///
/// Per-file decode failures never reach this type; they are absorbed by the
/// metadata normalizer. Only request-level misuse and I/O are reported.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Clipboard payload or system clipboard error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record with this id is in the collection
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
