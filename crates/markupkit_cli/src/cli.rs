//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// MarkupKit - incremental parser for lightweight markup
#[derive(Parser)]
#[command(name = "mkparse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Parser options file path (JSON, comments allowed)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a file and print its syntax tree
    Parse {
        /// File to parse
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Apply a list of edits to a file, reparsing after each one
    Replay {
        /// File holding the initial text
        file: PathBuf,

        /// JSON list of `{ "start", "end", "text" }` edits in UTF-16 code units
        #[arg(short, long)]
        edits: PathBuf,

        /// Output format for the final tree
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },
}

/// How a syntax tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// S-expression of node types
    Compact,
    /// One line per node with its range and text
    Ranges,
    /// The tree as JSON
    Json,
}
