//! Clipboard-specific error types
//!
//! Payload construction fails only on caller misuse: an empty path list or
//! a path that cannot be represented in the requested format. Nothing is
//! returned on failure, so a partially encoded payload never reaches the
//! system clipboard.

use std::path::PathBuf;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No paths were supplied
    #[error("No paths to copy")]
    NoPaths,

    /// A path is not valid UTF-8
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A path cannot be encoded in the requested format
    #[error("Invalid path for {format}: {path}")]
    InvalidPath { format: &'static str, path: String },

    /// The system clipboard could not be opened or written
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
