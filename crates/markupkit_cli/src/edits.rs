//! Edit scripts for `mkparse replay`.

use std::ops::Range;
use std::path::Path;

use jsonc_parser::ParseOptions;
use miette::{IntoDiagnostic, Result, miette};
use serde::Deserialize;

/// One replacement, in UTF-16 code units of the text at the time it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: String,
}

impl Edit {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Checks that the edit fits a buffer of `length` units.
    pub fn validate(&self, length: usize) -> Result<()> {
        if self.start > self.end || self.end > length {
            return Err(miette!(
                "Edit [{}, {}) is out of bounds for a buffer of {} code units",
                self.start,
                self.end,
                length
            ));
        }
        Ok(())
    }
}

/// Loads an edit script. Comments and trailing commas are allowed.
pub fn load_edits(path: &Path) -> Result<Vec<Edit>> {
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("Failed to read edits from {}", path.display())))?;
    parse_edits(&content)
}

pub fn parse_edits(content: &str) -> Result<Vec<Edit>> {
    let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| miette!("Failed to parse edits: {}", e))?
        .unwrap_or(serde_json::Value::Array(Vec::new()));

    serde_json::from_value(value).map_err(|e| miette!("Invalid edits: {}", e))
}
