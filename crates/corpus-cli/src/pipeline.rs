//! Pipeline orchestration for the CLI commands.
//!
//! The CLI is one adapter over the core crates: infer headers, push the
//! user's selections through the session store, load the raw frames, and
//! materialize. Everything here is plain synchronous calls; errors bubble up
//! with context for the terminal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use corpus_ingest::{CsvSource, infer_headers, load_frame};
use corpus_model::{DataType, DatasetSide, Header};
use corpus_session::Session;

/// Everything the merge command needs to run.
#[derive(Debug, Clone, Default)]
pub struct MergeSpec {
    pub corpus: PathBuf,
    pub meta: Option<PathBuf>,
    /// Corpus column holding document text.
    pub text: Option<String>,
    pub corpus_link: Option<String>,
    pub meta_link: Option<String>,
    pub exclude: Vec<String>,
    pub meta_exclude: Vec<String>,
    pub datatypes: Vec<(String, DataType)>,
    pub meta_datatypes: Vec<(String, DataType)>,
}

/// Parses a `COLUMN=TYPE` datatype override.
pub fn parse_datatype_spec(raw: &str) -> Result<(String, DataType)> {
    let (column, datatype) = raw
        .split_once('=')
        .with_context(|| format!("expected COLUMN=TYPE, got '{raw}'"))?;
    let datatype: DataType = datatype
        .parse()
        .with_context(|| format!("in override '{raw}'"))?;
    Ok((column.trim().to_string(), datatype))
}

/// Infers the header list of one tabular file.
pub fn infer_schema(path: &Path) -> Result<Vec<Header>> {
    let source = CsvSource::new(path);
    infer_headers(&source).with_context(|| format!("inferring schema of {}", path.display()))
}

/// Runs the full load-select-link-materialize pipeline.
pub fn run_merge(spec: &MergeSpec) -> Result<DataFrame> {
    let corpus_source = CsvSource::new(&spec.corpus);
    let mut session = Session::new();

    session.load_corpus(
        infer_headers(&corpus_source)
            .with_context(|| format!("inferring schema of {}", spec.corpus.display()))?,
    );
    apply_selections(
        &mut session,
        DatasetSide::Corpus,
        &spec.exclude,
        &spec.datatypes,
    )?;
    if let Some(text) = &spec.text {
        session.set_text_header(Some(text))?;
    }

    let meta_source = spec.meta.as_ref().map(CsvSource::new);
    if let Some(source) = &meta_source {
        session.load_meta(
            infer_headers(source)
                .with_context(|| format!("inferring schema of {}", source.path().display()))?,
        );
        apply_selections(
            &mut session,
            DatasetSide::Meta,
            &spec.meta_exclude,
            &spec.meta_datatypes,
        )?;
    }

    if let Some(link) = &spec.corpus_link {
        session.set_link_header(DatasetSide::Corpus, Some(link))?;
    }
    if let Some(link) = &spec.meta_link {
        session.set_link_header(DatasetSide::Meta, Some(link))?;
    }

    let corpus_df = load_frame(&corpus_source)
        .with_context(|| format!("loading {}", spec.corpus.display()))?;
    let meta_df = match &meta_source {
        Some(source) => Some(
            load_frame(source).with_context(|| format!("loading {}", source.path().display()))?,
        ),
        None => None,
    };

    session
        .materialize(&corpus_df, meta_df.as_ref())
        .context("materializing output")
}

fn apply_selections(
    session: &mut Session,
    side: DatasetSide,
    exclude: &[String],
    datatypes: &[(String, DataType)],
) -> Result<()> {
    for column in exclude {
        session
            .update_header(side, column, Some(false), None)
            .with_context(|| format!("excluding {side} column '{column}'"))?;
    }
    for (column, datatype) in datatypes {
        session
            .update_header(side, column, None, Some(*datatype))
            .with_context(|| format!("setting {side} column '{column}' to {datatype}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datatype_spec() {
        let (column, datatype) = parse_datatype_spec("year=NUMBER").unwrap();
        assert_eq!(column, "year");
        assert_eq!(datatype, DataType::Number);
    }

    #[test]
    fn test_parse_datatype_spec_rejects_bad_input() {
        assert!(parse_datatype_spec("year").is_err());
        assert!(parse_datatype_spec("year=BLOB").is_err());
    }
}
