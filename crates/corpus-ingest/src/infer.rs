//! Schema inference over multi-object sources.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use corpus_model::Header;

use crate::error::{Result, SchemaError};
use crate::source::SourceReader;

/// Infers the header list for a source.
///
/// Sources bundling several objects (tables in a container file) must agree
/// on one column list, names and order both; the shared list becomes the
/// header list. A source with zero objects yields an empty list. Every
/// inferred header starts as STRING and included: no value sniffing happens
/// here, datatype refinement is a later user action applied by the casting
/// engine.
///
/// Duplicate column names are de-duplicated keeping the first occurrence, so
/// the result satisfies the unique-name invariant the session store relies
/// on.
pub fn infer_headers(source: &impl SourceReader) -> Result<Vec<Header>> {
    let objects = source.list_schema().map_err(SchemaError::from)?;

    let Some(first) = objects.first() else {
        return Ok(Vec::new());
    };

    for object in &objects[1..] {
        if object.columns != first.columns {
            return Err(SchemaError::IncompatibleObjects {
                first: first.name.clone(),
                other: object.name.clone(),
            });
        }
    }

    let mut headers: Vec<Header> = Vec::with_capacity(first.columns.len());
    for name in &first.columns {
        if headers.iter().any(|h| &h.name == name) {
            debug!(column = %name, "dropping duplicate column name");
            continue;
        }
        headers.push(Header::new(name));
    }

    info!(
        objects = objects.len(),
        columns = headers.len(),
        "inferred source schema"
    );
    Ok(headers)
}

/// Loads the source into one dataframe, concatenating bundled objects in
/// object order.
///
/// Schema compatibility across objects is the inference engine's concern;
/// frames that still disagree here surface as a frame error rather than a
/// silent diagonal fill.
pub fn load_frame(source: &impl SourceReader) -> Result<DataFrame> {
    let objects = source.load().map_err(SchemaError::from)?;

    let mut iter = objects.into_iter();
    let Some((_, mut frame)) = iter.next() else {
        return Ok(DataFrame::empty());
    };

    for (name, other) in iter {
        debug!(object = %name, rows = other.height(), "stacking bundled object");
        frame.vstack_mut(&other)?;
    }

    Ok(frame)
}
