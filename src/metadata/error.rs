//! Metadata decoding error types
//!
//! None of these errors escape the normalizer: a failed field degrades
//! to an empty value and a failed file is still emitted with default
//! metadata. They exist so the failure can be logged with context.

use thiserror::Error;

/// Errors raised while turning raw metadata into canonical fields
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The tag held a value of a shape the field cannot use
    #[error("Unsupported value for {field}: {kind}")]
    UnsupportedValue { field: &'static str, kind: &'static str },

    /// Date text did not match `YYYY:MM:DD HH:MM:SS`
    #[error("Invalid date/time '{0}'")]
    InvalidDateTime(String),

    /// The metadata container could not be parsed
    #[error("Metadata container error: {0}")]
    Container(#[from] ::exif::Error),

    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
