//! Header entities and dataset sides.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DataType;

/// Which dataset a header belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetSide {
    /// The primary dataset, one row per document.
    Corpus,
    /// The auxiliary dataset joined to the corpus via a link key.
    Meta,
}

impl DatasetSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSide::Corpus => "corpus",
            DatasetSide::Meta => "metadata",
        }
    }
}

impl fmt::Display for DatasetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column's identity plus its selection state.
///
/// Identity is the `name`, unique within its owning collection. The
/// `datatype` and `include` fields are mutable selection state, changed only
/// through the session store so role invariants (text header, link header)
/// are re-checked on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Column name as it appears in the source.
    pub name: String,
    /// Semantic type the column is coerced to at materialization.
    pub datatype: DataType,
    /// Whether the column survives into the materialized frame.
    pub include: bool,
}

impl Header {
    /// Creates a header with the inference defaults: STRING, included.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: DataType::String,
            include: true,
        }
    }

    /// Sets the datatype.
    #[must_use]
    pub fn with_datatype(mut self, datatype: DataType) -> Self {
        self.datatype = datatype;
        self
    }

    /// Sets the include flag.
    #[must_use]
    pub fn with_include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let h = Header::new("text");
        assert_eq!(h.name, "text");
        assert_eq!(h.datatype, DataType::String);
        assert!(h.include);
    }

    #[test]
    fn test_builder_chain() {
        let h = Header::new("year")
            .with_datatype(DataType::Number)
            .with_include(false);
        assert_eq!(h.datatype, DataType::Number);
        assert!(!h.include);
    }

    #[test]
    fn test_serde_roundtrip() {
        let h = Header::new("id").with_datatype(DataType::Category);
        let json = serde_json::to_string(&h).unwrap();
        let back: Header = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(DatasetSide::Corpus.to_string(), "corpus");
        assert_eq!(DatasetSide::Meta.to_string(), "metadata");
    }
}
