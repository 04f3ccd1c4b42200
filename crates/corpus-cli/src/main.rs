//! Corpus loader CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use corpus_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_merge, run_schema};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match &cli.command {
        Command::Schema(args) => report(run_schema(args)),
        Command::Merge(args) => report(run_merge(args)),
    };
    std::process::exit(exit_code);
}

fn report(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}
