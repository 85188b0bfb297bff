//! Parsing rule trait definition.

use std::fmt;
use std::sync::Arc;

use markupkit_ast::{NodeBuilder, NodeType};
use markupkit_text::PieceTable;

use crate::{MemoizationTable, ParsingResult};

/// Shared handle to a rule.
pub type Rule = Arc<dyn ParsingRule>;

/// Dense identifier of a memoized rule within its grammar.
///
/// Ids are handed out by [`GrammarBuilder`](crate::GrammarBuilder) and index
/// directly into each memoization column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    /// Position of this rule in a memoization column.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trait for rules that recognize text at a position.
///
/// Implementations must be pure functions of the text they examine: the
/// same text at the same relative offsets must give the same result, and
/// `examined_length` must cover every unit the decision depended on. The
/// incremental parser relies on both to decide which results survive an edit.
///
/// # Example
///
/// ```rust
/// use markupkit_parser::{ParseContext, ParsingResult, ParsingRule};
///
/// /// Matches a single ASCII digit.
/// #[derive(Debug)]
/// struct Digit;
///
/// impl ParsingRule for Digit {
///     fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
///         match cx.utf16_at(index) {
///             Some(unit) if (b'0' as u16..=b'9' as u16).contains(&unit) => {
///                 ParsingResult::success(1, 1, None)
///             }
///             _ => ParsingResult::failure(1),
///         }
///     }
/// }
/// ```
pub trait ParsingRule: fmt::Debug + Send + Sync {
    /// Attempts to match at `index`.
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult;
}

/// Everything a rule can see during one parse pass.
pub struct ParseContext<'a> {
    text: &'a PieceTable,
    memoization_table: &'a mut MemoizationTable,
    merge_terminals: bool,
}

impl<'a> ParseContext<'a> {
    /// Creates a context over `text` backed by `memoization_table`.
    pub fn new(text: &'a PieceTable, memoization_table: &'a mut MemoizationTable) -> Self {
        Self {
            text,
            memoization_table,
            merge_terminals: true,
        }
    }

    /// Enables or disables same-type terminal merging in builders from this context.
    pub fn with_merge_terminals(mut self, merge: bool) -> Self {
        self.merge_terminals = merge;
        self
    }

    /// Number of code units in the text.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the code unit at `index`, or `None` at the end of input.
    #[inline]
    pub fn utf16_at(&self, index: usize) -> Option<u16> {
        self.text.utf16_at(index)
    }

    /// The text being parsed.
    pub fn text(&self) -> &PieceTable {
        self.text
    }

    /// The memoization table for this pass.
    pub fn memoization_table(&mut self) -> &mut MemoizationTable {
        self.memoization_table
    }

    /// Starts a node builder configured for this pass.
    pub fn node_builder(&self, node_type: NodeType) -> NodeBuilder {
        NodeBuilder::new(node_type).merge_terminals(self.merge_terminals)
    }

    /// Starts a fragment builder configured for this pass.
    pub fn fragment_builder(&self) -> NodeBuilder {
        self.node_builder(NodeType::FRAGMENT)
    }
}
