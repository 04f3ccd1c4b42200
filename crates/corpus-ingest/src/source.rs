//! The source reader contract and an in-memory implementation.

use polars::prelude::DataFrame;

use crate::error::SourceError;

/// Column layout of one tabular object inside a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Object name (table name, sheet name, or file stem for flat files).
    pub name: String,
    /// Column names in source order.
    pub columns: Vec<String>,
}

/// A tabular source that may bundle several objects (tables, sheets).
///
/// Implementations cover one file format each. The two methods are the whole
/// contract: schema listing is cheap and drives inference; `load` is the
/// potentially slow full read. Both are blocking calls with no cancellation
/// point; a caller wanting cancellation runs them on a worker it can abandon.
pub trait SourceReader {
    /// Lists every bundled object with its ordered column names.
    fn list_schema(&self) -> Result<Vec<ObjectSchema>, SourceError>;

    /// Loads every bundled object as a raw dataframe, in the same order as
    /// [`list_schema`](Self::list_schema).
    fn load(&self) -> Result<Vec<(String, DataFrame)>, SourceError>;
}

/// In-memory source over pre-built frames.
///
/// Used by tests and by embedders that already hold their data as
/// dataframes.
#[derive(Debug, Clone, Default)]
pub struct FramesSource {
    objects: Vec<(String, DataFrame)>,
}

impl FramesSource {
    pub fn new(objects: Vec<(String, DataFrame)>) -> Self {
        Self { objects }
    }

    /// Adds one named object.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>, frame: DataFrame) -> Self {
        self.objects.push((name.into(), frame));
        self
    }
}

impl SourceReader for FramesSource {
    fn list_schema(&self) -> Result<Vec<ObjectSchema>, SourceError> {
        Ok(self
            .objects
            .iter()
            .map(|(name, frame)| ObjectSchema {
                name: name.clone(),
                columns: frame
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
            .collect())
    }

    fn load(&self) -> Result<Vec<(String, DataFrame)>, SourceError> {
        Ok(self.objects.clone())
    }
}
