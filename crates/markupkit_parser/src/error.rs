//! Parse error types.

use std::path::PathBuf;

use markupkit_ast::TreeError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The start rule did not consume the whole buffer.
    #[error("Incomplete parse: consumed {length} of {total} code units")]
    Incomplete {
        /// Code units consumed before the start rule stopped. Zero if it failed.
        length: usize,
        /// Length of the buffer.
        total: usize,
    },

    /// The start rule consumed everything but did not produce exactly one root.
    #[error("Expected a single root node spanning {length} code units, found {roots}")]
    NoSingleRoot {
        /// Code units consumed.
        length: usize,
        /// Number of top-level nodes produced.
        roots: usize,
    },

    /// Navigation through the tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Creates a new incomplete parse error.
    pub fn incomplete(length: usize, total: usize) -> Self {
        Self::Incomplete { length, total }
    }

    /// Number of code units the parse managed to cover.
    pub fn consumed_length(&self) -> usize {
        match self {
            Self::Incomplete { length, .. } | Self::NoSingleRoot { length, .. } => *length,
            Self::Tree(_) => 0,
        }
    }
}

/// Errors that can occur while loading [`ParserOptions`](crate::ParserOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options file could not be read.
    #[error("Failed to read options from {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The text is not valid JSON (comments allowed).
    #[error("Invalid JSON: {0}")]
    Syntax(String),

    /// The JSON does not describe valid options.
    #[error("Invalid options: {0}")]
    Invalid(#[from] serde_json::Error),
}
