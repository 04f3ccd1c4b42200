//! Error types for session state and merging.

use corpus_model::DatasetSide;
use thiserror::Error;

/// Role a header can hold, used in lock diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    /// The corpus column holding document text.
    Text,
    /// The join-key column of its dataset.
    Link,
}

impl std::fmt::Display for HeaderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HeaderRole::Text => "text header",
            HeaderRole::Link => "link header",
        })
    }
}

/// Errors raised by session store mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A referenced header name does not exist in the target collection.
    #[error("header '{name}' not found in {side} collection")]
    HeaderNotFound { side: DatasetSide, name: String },

    /// Attempt to mutate a field pinned by a text- or link-header role.
    #[error("header '{name}' is locked while acting as {role}")]
    LockedField { name: String, role: HeaderRole },

    /// An operation needed the corpus collection before it was loaded.
    #[error("no corpus loaded")]
    NoCorpus,

    /// An operation needed the metadata collection before it was loaded.
    #[error("no metadata loaded")]
    NoMeta,
}

/// Errors raised by the link-resolution merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A non-link column name exists on both sides; with no disambiguation
    /// convention defined, failing beats silently overwriting.
    #[error("ambiguous column name across corpus and metadata: '{column}'")]
    AmbiguousColumn { column: String },

    /// Merge invoked while the link is unresolved. Callers are expected to
    /// gate on the session's link status first.
    #[error("merge invoked while link is unresolved")]
    LinkUnresolved,

    /// A declared link column is absent from its frame.
    #[error("link column '{column}' not found in dataframe")]
    LinkColumnMissing { column: String },

    /// Failed DataFrame operation.
    #[error("dataframe operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for MergeError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Errors raised by full materialization (cast + merge).
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Cast(#[from] corpus_cast::CastError),
    #[error(transparent)]
    Merge(#[from] MergeError),
}
