//! # markupkit_parser
//!
//! Incremental packrat parsing engine for MarkupKit.
//!
//! This crate provides:
//! - A `ParsingRule` trait and a set of rule combinators
//! - A memoization table that survives text edits
//! - An `IncrementalParsingBuffer` that reparses after every edit
//! - A built-in lightweight-markup grammar
//!
//! ## Architecture
//!
//! Every memoized (rule, position) result records how far the rule looked
//! ahead. When the text changes, the table shifts its columns along with the
//! text and drops only the results whose examined span reached the edit.
//! The next parse runs from position zero again but answers most attempts
//! from the table, reusing the nodes it built last time.
//!
//! ## Example
//!
//! ```rust
//! use markupkit_parser::{IncrementalParsingBuffer, markup};
//!
//! let mut buffer = IncrementalParsingBuffer::new("#a #b", markup::grammar());
//! buffer.replace_characters(2..3, "");
//!
//! let root = buffer.root().unwrap();
//! assert_eq!(root.compact_structure(), "(document (paragraph hashtag))");
//! ```

mod buffer;
mod error;
mod grammar;
pub mod markup;
mod memo;
mod options;
mod result;
mod rule;
pub mod rules;

pub use buffer::IncrementalParsingBuffer;
pub use error::{OptionsError, ParseError};
pub use grammar::{Grammar, GrammarBuilder};
pub use memo::{MemoizationStatistics, MemoizationTable};
pub use options::ParserOptions;
pub use result::ParsingResult;
pub use rule::{ParseContext, ParsingRule, Rule, RuleId};
