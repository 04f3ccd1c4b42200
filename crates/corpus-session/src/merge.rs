//! Link resolution: joining metadata onto the corpus.

use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinType, col};
use tracing::{debug, warn};

use crate::error::MergeError;

/// Left-joins the metadata frame onto the corpus frame via the link columns.
///
/// The corpus is the driving side: every corpus row appears in the output,
/// with null metadata fields when no metadata row matches; metadata rows
/// matching no corpus row are dropped. Several metadata rows matching one
/// corpus link value produce standard join fan-out: the corpus row is
/// repeated per match. That is accepted behavior, logged at `warn` so it is
/// visible, never an error.
///
/// The metadata link column itself does not survive into the output; any
/// other column name shared between the two frames is ambiguous and fails
/// the merge, since no renaming convention is defined.
pub fn merge_frames(
    corpus: &DataFrame,
    corpus_link: &str,
    meta: &DataFrame,
    meta_link: &str,
) -> Result<DataFrame, MergeError> {
    if corpus.column(corpus_link).is_err() {
        return Err(MergeError::LinkColumnMissing {
            column: corpus_link.to_string(),
        });
    }
    if meta.column(meta_link).is_err() {
        return Err(MergeError::LinkColumnMissing {
            column: meta_link.to_string(),
        });
    }

    for name in meta.get_column_names() {
        if name.as_str() == meta_link {
            continue;
        }
        if corpus.column(name.as_str()).is_ok() {
            return Err(MergeError::AmbiguousColumn {
                column: name.to_string(),
            });
        }
    }

    debug!(
        corpus_rows = corpus.height(),
        meta_rows = meta.height(),
        corpus_link,
        meta_link,
        "merging metadata onto corpus"
    );

    let merged = corpus
        .clone()
        .lazy()
        .join(
            meta.clone().lazy(),
            [col(corpus_link)],
            [col(meta_link)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    if merged.height() > corpus.height() {
        warn!(
            corpus_rows = corpus.height(),
            merged_rows = merged.height(),
            "duplicate metadata link values fanned out corpus rows"
        );
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series, SortMultipleOptions};

    fn str_frame(columns: &[(&str, &[&str])]) -> DataFrame {
        let cols: Vec<Column> = columns
            .iter()
            .map(|(name, values)| {
                Series::new(
                    (*name).into(),
                    values.iter().copied().map(String::from).collect::<Vec<_>>(),
                )
                .into_column()
            })
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn sorted_by<const N: usize>(df: DataFrame, by: [&str; N]) -> DataFrame {
        df.sort(by, SortMultipleOptions::default()).unwrap()
    }

    #[test]
    fn test_fan_out_pairs_every_match() {
        let corpus = str_frame(&[("id", &["1", "2"]), ("text", &["a", "b"])]);
        let meta = str_frame(&[("id", &["1", "1", "2"]), ("city", &["X", "Y", "Z"])]);

        let merged = merge_frames(&corpus, "id", &meta, "id").unwrap();
        assert_eq!(merged.height(), 3);

        let merged = sorted_by(merged, ["id", "city"]);
        let ids: Vec<Option<&str>> = merged.column("id").unwrap().str().unwrap().iter().collect();
        let cities: Vec<Option<&str>> =
            merged.column("city").unwrap().str().unwrap().iter().collect();
        assert_eq!(ids, vec![Some("1"), Some("1"), Some("2")]);
        assert_eq!(cities, vec![Some("X"), Some("Y"), Some("Z")]);
    }

    #[test]
    fn test_unmatched_corpus_row_kept_with_nulls() {
        let corpus = str_frame(&[("id", &["1", "3"]), ("text", &["a", "c"])]);
        let meta = str_frame(&[("id", &["1"]), ("city", &["X"])]);

        let merged = merge_frames(&corpus, "id", &meta, "id").unwrap();
        assert_eq!(merged.height(), 2);

        let merged = sorted_by(merged, ["id"]);
        let cities: Vec<Option<&str>> =
            merged.column("city").unwrap().str().unwrap().iter().collect();
        assert_eq!(cities, vec![Some("X"), None]);
    }

    #[test]
    fn test_unmatched_metadata_rows_dropped() {
        let corpus = str_frame(&[("id", &["1"]), ("text", &["a"])]);
        let meta = str_frame(&[("id", &["1", "9"]), ("city", &["X", "Nowhere"])]);

        let merged = merge_frames(&corpus, "id", &meta, "id").unwrap();
        assert_eq!(merged.height(), 1);
    }

    #[test]
    fn test_differing_link_names_drop_meta_key() {
        let corpus = str_frame(&[("doc_id", &["1"]), ("text", &["a"])]);
        let meta = str_frame(&[("meta_id", &["1"]), ("city", &["X"])]);

        let merged = merge_frames(&corpus, "doc_id", &meta, "meta_id").unwrap();
        let names: Vec<String> = merged
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(names.contains(&"doc_id".to_string()));
        assert!(names.contains(&"city".to_string()));
        assert!(!names.contains(&"meta_id".to_string()));
    }

    #[test]
    fn test_ambiguous_column_fails() {
        let corpus = str_frame(&[("id", &["1"]), ("notes", &["a"])]);
        let meta = str_frame(&[("id", &["1"]), ("notes", &["b"])]);

        let err = merge_frames(&corpus, "id", &meta, "id").unwrap_err();
        assert!(matches!(
            err,
            MergeError::AmbiguousColumn { ref column } if column == "notes"
        ));
    }

    #[test]
    fn test_missing_link_column_fails() {
        let corpus = str_frame(&[("id", &["1"])]);
        let meta = str_frame(&[("id", &["1"])]);

        let err = merge_frames(&corpus, "doc_id", &meta, "id").unwrap_err();
        assert!(matches!(
            err,
            MergeError::LinkColumnMissing { ref column } if column == "doc_id"
        ));
    }
}
