//! Error types for source reading and schema inference.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a concrete source reader.
///
/// Readers never leak their underlying library's error types; everything is
/// funneled through this enum so the inference engine has one boundary to
/// wrap.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File not found or not readable.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but could not be parsed as its format.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Errors raised by schema inference and frame loading.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The underlying source could not be read or parsed. The reader's
    /// original message is preserved as the error source.
    #[error("source unreadable")]
    Source(#[from] SourceError),

    /// Bundled objects in one source disagree on their column lists.
    #[error(
        "incompatible schemas among bundled objects: '{other}' does not match columns of '{first}'"
    )]
    IncompatibleObjects { first: String, other: String },

    /// Failed DataFrame operation while assembling the loaded frame.
    #[error("dataframe operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for SchemaError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
