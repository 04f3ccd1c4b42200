//! Error types for the casting engine.

use corpus_model::DataType;
use thiserror::Error;

/// Errors raised while coercing columns to their declared datatypes.
///
/// Casting is fail-fast: the first column that cannot be coerced aborts the
/// whole cast, so a partially-typed frame is never observable.
#[derive(Debug, Error)]
pub enum CastError {
    /// A value could not be parsed as the column's declared datatype.
    #[error("cannot coerce value '{value}' in column '{column}' to {datatype}")]
    Coercion {
        column: String,
        datatype: DataType,
        value: String,
    },

    /// The source column's physical type has no coercion rule for the
    /// declared datatype.
    #[error("no coercion from {from} to {datatype} for column '{column}'")]
    Unsupported {
        column: String,
        datatype: DataType,
        from: String,
    },

    /// A header names a column absent from the frame being cast.
    #[error("column '{column}' not found in dataframe")]
    ColumnMissing { column: String },

    /// Failed DataFrame operation.
    #[error("dataframe operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for CastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for casting operations.
pub type Result<T> = std::result::Result<T, CastError>;
