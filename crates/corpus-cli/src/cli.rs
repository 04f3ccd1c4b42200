//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "corpus",
    version,
    about = "Corpus loader - reconcile tabular corpus and metadata files",
    long_about = "Load a corpus file and an optional metadata file, choose which \
                  columns to keep and how to type them, and link the two on a \
                  shared key to produce one merged table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}

#[derive(Subcommand)]
pub enum Command {
    /// Infer and print the header list of a tabular file.
    Schema(SchemaArgs),

    /// Load, link, and merge a corpus with its metadata.
    Merge(MergeArgs),
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Path to the tabular file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Path to the corpus file.
    #[arg(long = "corpus", value_name = "FILE")]
    pub corpus: PathBuf,

    /// Path to the metadata file.
    #[arg(long = "meta", value_name = "FILE")]
    pub meta: Option<PathBuf>,

    /// Corpus column holding the document text.
    #[arg(long = "text", value_name = "COLUMN")]
    pub text: Option<String>,

    /// Corpus column used as the join key.
    #[arg(long = "corpus-link", value_name = "COLUMN")]
    pub corpus_link: Option<String>,

    /// Metadata column used as the join key.
    #[arg(long = "meta-link", value_name = "COLUMN")]
    pub meta_link: Option<String>,

    /// Corpus column to drop from the output (repeatable).
    #[arg(long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Metadata column to drop from the output (repeatable).
    #[arg(long = "meta-exclude", value_name = "COLUMN")]
    pub meta_exclude: Vec<String>,

    /// Corpus datatype override as COLUMN=TYPE (repeatable).
    ///
    /// TYPE is one of STRING, CATEGORY, NUMBER, DATETIME, BOOLEAN.
    #[arg(long = "datatype", value_name = "COLUMN=TYPE")]
    pub datatypes: Vec<String>,

    /// Metadata datatype override as COLUMN=TYPE (repeatable).
    #[arg(long = "meta-datatype", value_name = "COLUMN=TYPE")]
    pub meta_datatypes: Vec<String>,

    /// Write the merged table to a CSV file instead of printing a preview.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}
