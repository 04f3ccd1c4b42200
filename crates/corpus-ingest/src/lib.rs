//! Source readers and schema inference.
//!
//! A [`SourceReader`] exposes a tabular file as one or more named objects,
//! each with an ordered column list and a raw dataframe. [`infer_headers`]
//! turns a source into the validated header list the session store works
//! with; [`load_frame`] materializes the source as a single dataframe.
//!
//! One concrete reader is provided for delimited text ([`CsvSource`]); other
//! formats plug in behind the same trait. [`FramesSource`] serves tests and
//! embedders that already hold dataframes.
//!
//! # Example
//!
//! ```ignore
//! use corpus_ingest::{CsvSource, infer_headers, load_frame};
//!
//! let source = CsvSource::new("reviews.csv");
//! let headers = infer_headers(&source)?;
//! let frame = load_frame(&source)?;
//! ```

mod csv;
mod error;
mod infer;
mod source;

pub use csv::CsvSource;
pub use error::{Result, SchemaError, SourceError};
pub use infer::{infer_headers, load_frame};
pub use source::{FramesSource, ObjectSchema, SourceReader};
