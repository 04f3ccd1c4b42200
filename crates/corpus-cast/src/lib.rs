//! Type-casting engine.
//!
//! [`cast_frame`] takes a raw dataframe plus a header collection and
//! produces the materialized frame: excluded columns dropped, every retained
//! column coerced to its declared [`corpus_model::DataType`], column order
//! following the header collection.
//!
//! Coercion is fail-fast. The first value that cannot be parsed aborts the
//! cast with a [`CastError`] naming the column, target datatype, and
//! offending value; there is no silent null substitution beyond the standard
//! empty-cell-is-null rule.

mod cast;
mod error;

pub use cast::cast_frame;
pub use error::{CastError, Result};
