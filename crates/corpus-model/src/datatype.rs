//! Semantic column datatypes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic type a column is coerced to when the dataframe is materialized.
///
/// This is a closed enumeration: the casting engine in `corpus-cast` has one
/// coercion rule per variant, and any adapter presenting datatype choices
/// must offer exactly this set. Adding a variant means adding a casting rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Free text. The default for every inferred column.
    #[default]
    String,
    /// Discrete labels drawn from a (small) value set. Stored as strings in
    /// the materialized frame; the distinction drives downstream analysis,
    /// not the physical representation.
    Category,
    /// Floating-point numeric values.
    Number,
    /// Calendar date or date-and-time, microsecond precision.
    Datetime,
    /// True/false values.
    Boolean,
}

impl DataType {
    /// All datatypes, in presentation order.
    pub const ALL: [DataType; 5] = [
        DataType::String,
        DataType::Category,
        DataType::Number,
        DataType::Datetime,
        DataType::Boolean,
    ];

    /// Returns the canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Category => "CATEGORY",
            DataType::Number => "NUMBER",
            DataType::Datetime => "DATETIME",
            DataType::Boolean => "BOOLEAN",
        }
    }

    /// Canonical names of all datatypes, in presentation order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(DataType::as_str).collect()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown datatype name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDataTypeError(pub String);

impl fmt::Display for ParseDataTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown datatype '{}'", self.0)
    }
}

impl std::error::Error for ParseDataTypeError {}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STRING" | "TEXT" => Ok(DataType::String),
            "CATEGORY" => Ok(DataType::Category),
            "NUMBER" | "NUMERIC" | "FLOAT" => Ok(DataType::Number),
            "DATETIME" | "DATE" => Ok(DataType::Datetime),
            "BOOLEAN" | "BOOL" => Ok(DataType::Boolean),
            _ => Err(ParseDataTypeError(s.to_string())),
        }
    }
}
