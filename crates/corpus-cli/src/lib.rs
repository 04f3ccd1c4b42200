//! CLI library components for the corpus loader.

pub mod logging;
pub mod pipeline;
