//! Command implementations: schema printing and the merge pipeline.

use std::fs::File;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};
use polars::prelude::{CsvWriter, SerWriter};

use corpus_cli::pipeline::{self, MergeSpec, parse_datatype_spec};
use corpus_model::Header;

use crate::cli::{MergeArgs, SchemaArgs};

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let headers = pipeline::infer_schema(&args.file)?;
    if headers.is_empty() {
        println!("no columns found in {}", args.file.display());
        return Ok(());
    }
    print_header_table(&headers);
    Ok(())
}

pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let spec = merge_spec_from_args(args)?;
    let mut merged = pipeline::run_merge(&spec)?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(&mut merged)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "wrote {} rows x {} columns to {}",
                merged.height(),
                merged.width(),
                path.display()
            );
        }
        None => {
            println!("{}", merged.head(Some(10)));
            println!("{} rows x {} columns", merged.height(), merged.width());
        }
    }
    Ok(())
}

fn merge_spec_from_args(args: &MergeArgs) -> Result<MergeSpec> {
    let datatypes = args
        .datatypes
        .iter()
        .map(|raw| parse_datatype_spec(raw))
        .collect::<Result<Vec<_>>>()?;
    let meta_datatypes = args
        .meta_datatypes
        .iter()
        .map(|raw| parse_datatype_spec(raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(MergeSpec {
        corpus: args.corpus.clone(),
        meta: args.meta.clone(),
        text: args.text.clone(),
        corpus_link: args.corpus_link.clone(),
        meta_link: args.meta_link.clone(),
        exclude: args.exclude.clone(),
        meta_exclude: args.meta_exclude.clone(),
        datatypes,
        meta_datatypes,
    })
}

fn print_header_table(headers: &[Header]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Header name", "Datatype", "Include"]);
    for header in headers {
        table.add_row(vec![
            Cell::new(&header.name),
            Cell::new(header.datatype.as_str()),
            Cell::new(if header.include { "yes" } else { "no" })
                .set_alignment(CellAlignment::Center),
        ]);
    }
    println!("{table}");
}
