//! Parser options.

use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Switches that change how an
/// [`IncrementalParsingBuffer`](crate::IncrementalParsingBuffer) parses.
///
/// Every field has a default, so `{}` is a valid options file:
///
/// ```jsonc
/// {
///   // Clear the memoization table before every parse.
///   "memoize": false,
///   "verifyIncremental": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserOptions {
    /// Keep memoized results across parses. When false every parse starts
    /// from an empty table.
    pub memoize: bool,

    /// After each reparse, parse again from scratch and compare the trees.
    pub verify_incremental: bool,

    /// Merge adjacent terminals of the same type while building nodes.
    pub merge_terminals: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            memoize: true,
            verify_incremental: false,
            merge_terminals: true,
        }
    }
}

impl ParserOptions {
    /// Loads options from a JSON file. Comments and trailing commas are allowed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses options from a JSON string. Comments and trailing commas are allowed.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| OptionsError::Syntax(e.to_string()))?;

        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(options.memoize);
        assert!(!options.verify_incremental);
        assert!(options.merge_terminals);
    }

    #[rstest]
    #[case::empty_object("{}", ParserOptions::default())]
    #[case::empty_document("", ParserOptions::default())]
    #[case::camel_case(
        r#"{ "verifyIncremental": true }"#,
        ParserOptions { verify_incremental: true, ..ParserOptions::default() }
    )]
    #[case::comments_and_trailing_comma(
        "{\n  // off for comparison runs\n  \"memoize\": false,\n  \"mergeTerminals\": false,\n}",
        ParserOptions { memoize: false, merge_terminals: false, ..ParserOptions::default() }
    )]
    fn test_from_json(#[case] json: &str, #[case] expected: ParserOptions) {
        assert_eq!(ParserOptions::from_json(json).unwrap(), expected);
    }

    #[rstest]
    #[case::syntax("{ \"memoize\": ", "Invalid JSON")]
    #[case::wrong_type(r#"{ "memoize": "yes" }"#, "Invalid options")]
    #[case::unknown_field(r#"{ "cache": true }"#, "Invalid options")]
    fn test_from_json_errors(#[case] json: &str, #[case] prefix: &str) {
        let error = ParserOptions::from_json(json).unwrap_err();
        assert!(
            error.to_string().starts_with(prefix),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "memoize": false }}"#).unwrap();

        let options = ParserOptions::from_file(file.path()).unwrap();
        assert!(!options.memoize);
        assert!(options.merge_terminals);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = ParserOptions::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(error, OptionsError::Io { .. }));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_value(ParserOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "memoize": true,
                "verifyIncremental": false,
                "mergeTerminals": true
            })
        );
    }
}
