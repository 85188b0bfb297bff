//! Parse command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use markupkit_parser::{IncrementalParsingBuffer, ParserOptions, markup};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::output::output_tree;

pub fn run_parse(file: &Path, format: OutputFormat, options: ParserOptions) -> Result<bool> {
    let text = std::fs::read_to_string(file)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("Failed to read {}", file.display())))?;

    let buffer = IncrementalParsingBuffer::with_options(&text, markup::grammar(), options);
    debug!(
        path = %file.display(),
        length = buffer.len(),
        memoized = buffer.memoization_table().entry_count(),
        "parsed file"
    );

    output_tree(&buffer, format)
}
