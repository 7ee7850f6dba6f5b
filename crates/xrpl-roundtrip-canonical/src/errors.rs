use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort processing of a single record.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Input was empty after trimming whitespace and wrapping quotes.
    #[error("no input data provided")]
    EmptyInput,
    /// Input was neither valid hex nor a valid JSON object.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The external codec rejected the record.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// File or directory access failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A field definitions file could not be interpreted.
    #[error("invalid field definitions: {0}")]
    InvalidDefinitions(String),
}

impl HarnessError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures reported by a [`Codec`](crate::codec::Codec) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// JSON to hex conversion failed.
    #[error("encoding failed: {0}")]
    Encode(String),
    /// Hex to JSON conversion failed.
    #[error("decoding failed: {0}")]
    Decode(String),
    /// No usable codec is configured.
    #[error("codec unavailable: {0}")]
    Unavailable(String),
}
