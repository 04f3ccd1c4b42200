//! Core data model for corpus loading.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace:
//!
//! - [`DataType`]: the closed set of semantic column types
//! - [`Header`]: a column's identity plus its selection state
//! - [`DatasetSide`]: which dataset (corpus or metadata) a header belongs to
//!
//! Headers are plain owned values. The session store in `corpus-session` is
//! the single owner of every live header; other components address a header
//! by `(DatasetSide, name)` and read through the store's accessors rather
//! than holding an alias.

mod datatype;
mod header;

pub use datatype::DataType;
pub use header::{DatasetSide, Header};
