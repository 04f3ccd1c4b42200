//! CSV source reader backed by the polars CSV parser.

use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::SourceError;
use crate::source::{ObjectSchema, SourceReader};

/// A single-object source over one delimited text file.
///
/// Every column is read as a string: datatype refinement is a later,
/// user-driven step applied by the casting engine, so no value sniffing
/// happens at read time.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Object name for a flat file: the file stem, or the full file name
    /// when there is no stem to take.
    fn object_name(&self) -> String {
        self.path
            .file_stem()
            .or_else(|| self.path.file_name())
            .map_or_else(|| "csv".to_string(), |s| s.to_string_lossy().to_string())
    }

    fn read(&self, n_rows: Option<usize>) -> Result<DataFrame, SourceError> {
        // Stat first so missing/unreadable files surface as IO errors, not
        // parser noise.
        std::fs::metadata(&self.path).map_err(|e| SourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut options = CsvReadOptions::default()
            .with_has_header(true)
            // 0 disables schema inference: every column comes back as string
            .with_infer_schema_length(Some(0));
        if let Some(n) = n_rows {
            options = options.with_n_rows(Some(n));
        }

        options
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| self.parse_error(&e))?
            .finish()
            .map_err(|e| self.parse_error(&e))
    }

    fn parse_error(&self, err: &polars::prelude::PolarsError) -> SourceError {
        SourceError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceReader for CsvSource {
    fn list_schema(&self) -> Result<Vec<ObjectSchema>, SourceError> {
        let df = self.read(Some(0))?;
        Ok(vec![ObjectSchema {
            name: self.object_name(),
            columns: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }])
    }

    fn load(&self) -> Result<Vec<(String, DataFrame)>, SourceError> {
        let df = self.read(None)?;
        Ok(vec![(self.object_name(), df)])
    }
}
