//! Output formatting module

use miette::{IntoDiagnostic, Result};
use markupkit_parser::IncrementalParsingBuffer;

use crate::cli::OutputFormat;

/// Prints the buffer's current tree; returns true if the parse failed.
pub fn output_tree(buffer: &IncrementalParsingBuffer, format: OutputFormat) -> Result<bool> {
    println!("{}", render_tree(buffer, format)?);
    Ok(buffer.result().is_err())
}

pub fn render_tree(buffer: &IncrementalParsingBuffer, format: OutputFormat) -> Result<String> {
    let rendered = match (format, buffer.result()) {
        (OutputFormat::Compact, Ok(root)) => root.compact_structure(),
        (OutputFormat::Ranges, _) => buffer.debug_description(),
        (OutputFormat::Json, Ok(root)) => {
            let output = serde_json::json!({
                "length": buffer.len(),
                "tree": root,
            });
            serde_json::to_string_pretty(&output).into_diagnostic()?
        }
        (OutputFormat::Json, Err(error)) => {
            let output = serde_json::json!({
                "length": buffer.len(),
                "error": error.to_string(),
                "consumed": error.consumed_length(),
            });
            serde_json::to_string_pretty(&output).into_diagnostic()?
        }
        (OutputFormat::Compact, Err(error)) => format!("error: {error}"),
    };
    Ok(rendered)
}
