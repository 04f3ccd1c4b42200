//! Integration tests for the CLI pipeline.

use std::io::Write;

use polars::prelude::DataType as PlType;
use tempfile::NamedTempFile;

use corpus_cli::pipeline::{MergeSpec, infer_schema, run_merge};
use corpus_model::DataType;

fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn test_infer_schema_defaults() {
    let file = temp_csv("id,text,year\n1,hello,2001\n");
    let headers = infer_schema(file.path()).unwrap();

    let names: Vec<&str> = headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["id", "text", "year"]);
    assert!(headers.iter().all(|h| h.include));
    assert!(headers.iter().all(|h| h.datatype == DataType::String));
}

#[test]
fn test_run_merge_end_to_end() {
    let corpus = temp_csv("id,text,year,junk\n1,alpha,2001,x\n2,beta,2002,y\n3,gamma,2003,z\n");
    let meta = temp_csv("doc,city\n1,Perth\n1,Hobart\n2,Darwin\n9,Nowhere\n");

    let spec = MergeSpec {
        corpus: corpus.path().to_path_buf(),
        meta: Some(meta.path().to_path_buf()),
        text: Some("text".to_string()),
        corpus_link: Some("id".to_string()),
        meta_link: Some("doc".to_string()),
        exclude: vec!["junk".to_string()],
        datatypes: vec![("year".to_string(), DataType::Number)],
        ..Default::default()
    };

    let merged = run_merge(&spec).unwrap();

    // id=1 fans out to two metadata rows, id=3 matches none but survives.
    assert_eq!(merged.height(), 4);
    let names: Vec<String> = merged
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["id", "text", "year", "city"]);
    assert_eq!(merged.column("year").unwrap().dtype(), &PlType::Float64);
    assert_eq!(merged.column("city").unwrap().null_count(), 1);
}

#[test]
fn test_run_merge_corpus_only() {
    let corpus = temp_csv("id,text\n1,alpha\n2,beta\n");

    let spec = MergeSpec {
        corpus: corpus.path().to_path_buf(),
        text: Some("text".to_string()),
        ..Default::default()
    };

    let merged = run_merge(&spec).unwrap();
    assert_eq!(merged.height(), 2);
    assert_eq!(merged.width(), 2);
}

#[test]
fn test_run_merge_without_links_fails_when_meta_given() {
    let corpus = temp_csv("id,text\n1,alpha\n");
    let meta = temp_csv("doc,city\n1,Perth\n");

    let spec = MergeSpec {
        corpus: corpus.path().to_path_buf(),
        meta: Some(meta.path().to_path_buf()),
        ..Default::default()
    };

    let err = run_merge(&spec).unwrap_err();
    assert!(err.to_string().contains("materializing output"));
}

#[test]
fn test_run_merge_unknown_exclude_fails() {
    let corpus = temp_csv("id,text\n1,alpha\n");

    let spec = MergeSpec {
        corpus: corpus.path().to_path_buf(),
        exclude: vec!["ghost".to_string()],
        ..Default::default()
    };

    let err = run_merge(&spec).unwrap_err();
    assert!(format!("{err:#}").contains("ghost"));
}
