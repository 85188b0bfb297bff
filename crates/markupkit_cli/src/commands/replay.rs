//! Replay command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use markupkit_parser::{IncrementalParsingBuffer, ParserOptions, markup};
use tracing::info;

use crate::cli::OutputFormat;
use crate::edits::load_edits;
use crate::output::output_tree;

pub fn run_replay(
    file: &Path,
    edits: &Path,
    format: OutputFormat,
    options: ParserOptions,
) -> Result<bool> {
    let text = std::fs::read_to_string(file)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("Failed to read {}", file.display())))?;
    let edits = load_edits(edits)?;

    let mut buffer = IncrementalParsingBuffer::with_options(&text, markup::grammar(), options);
    info!("Replaying {} edits over {} code units", edits.len(), buffer.len());

    for (number, edit) in edits.iter().enumerate() {
        edit.validate(buffer.len())?;

        let before = buffer.memoization_statistics();
        buffer.replace_characters(edit.range(), &edit.text);
        let after = buffer.memoization_statistics();

        let status = if buffer.result().is_ok() { "ok" } else { "error" };
        println!(
            "edit {}: [{}, {}) {:?} -> {} (memo hits {}/{})",
            number + 1,
            edit.start,
            edit.end,
            edit.text,
            status,
            after.hits - before.hits,
            after.attempts - before.attempts
        );
    }

    output_tree(&buffer, format)
}
