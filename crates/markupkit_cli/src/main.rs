//! MarkupKit CLI
//!
//! Parses lightweight markup with the incremental parser and replays edit
//! scripts against it.

mod cli;
mod commands;
mod edits;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use markupkit_parser::ParserOptions;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_parse, run_replay};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let options = match &cli.config {
        Some(path) => ParserOptions::from_file(path).into_diagnostic()?,
        None => ParserOptions::default(),
    };

    match &cli.command {
        Commands::Parse { file, format } => run_parse(file, *format, options),
        Commands::Replay {
            file,
            edits,
            format,
        } => run_replay(file, edits, *format, options),
    }
}
