//! Text buffer that keeps its syntax tree current across edits.

use std::ops::Range;
use std::sync::Arc;

use markupkit_ast::{AnchoredNode, NodeRef};
use markupkit_text::PieceTable;
use tracing::{debug, warn};

use crate::{
    Grammar, MemoizationStatistics, MemoizationTable, ParseContext, ParseError, ParserOptions,
};

/// A piece-table buffer paired with a grammar and a memoization table.
///
/// The buffer parses on construction and again after every edit, so
/// [`result`](Self::result) always describes the current text. Between
/// parses the memoization table is kept and adjusted with
/// [`MemoizationTable::apply_edit`], which lets the next parse reuse every
/// result the edit could not have affected, nodes included.
///
/// # Example
///
/// ```rust
/// use markupkit_ast::NodeType;
/// use markupkit_parser::rules::{dot, RuleExt};
/// use markupkit_parser::{GrammarBuilder, IncrementalParsingBuffer};
///
/// let mut builder = GrammarBuilder::new();
/// let unit = builder.memoize(dot().as_node(NodeType::new("text")));
/// let grammar = builder.build(unit.zero_or_more().wrapping_in(NodeType::new("document")));
///
/// let mut buffer = IncrementalParsingBuffer::new("ab", grammar);
/// buffer.replace_characters(1..1, "X");
///
/// assert_eq!(buffer.string(), "aXb");
/// assert_eq!(buffer.root().unwrap().compact_structure(), "(document text)");
/// ```
#[derive(Debug)]
pub struct IncrementalParsingBuffer {
    text: PieceTable,
    grammar: Grammar,
    memoization_table: MemoizationTable,
    options: ParserOptions,
    result: Result<NodeRef, ParseError>,
    parse_count: usize,
}

impl IncrementalParsingBuffer {
    /// Creates a buffer holding `text` and parses it with `grammar`.
    pub fn new(text: &str, grammar: Grammar) -> Self {
        Self::with_options(text, grammar, ParserOptions::default())
    }

    /// Creates a buffer with explicit options.
    pub fn with_options(text: &str, grammar: Grammar, options: ParserOptions) -> Self {
        let text = PieceTable::new(text);
        let memoization_table = MemoizationTable::new(text.len());
        let mut buffer = Self {
            text,
            grammar,
            memoization_table,
            options,
            result: Err(ParseError::incomplete(0, 0)),
            parse_count: 0,
        };
        buffer.parse();
        buffer
    }

    /// Replaces the code units in `range` with `text` and reparses.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    pub fn replace_characters(&mut self, range: Range<usize>, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.text.replace_units(range.clone(), &units);
        self.memoization_table.apply_edit(range, units.len());
        self.parse();

        if self.options.verify_incremental {
            self.verify_incremental();
        }
    }

    fn parse(&mut self) {
        if !self.options.memoize {
            self.memoization_table.remove_all();
        }

        let before = self.memoization_table.statistics();
        self.result = run(
            &self.grammar,
            &self.text,
            &mut self.memoization_table,
            self.options.merge_terminals,
        );
        self.parse_count += 1;

        let after = self.memoization_table.statistics();
        debug!(
            length = self.text.len(),
            parse = self.parse_count,
            hits = after.hits - before.hits,
            attempts = after.attempts - before.attempts,
            "parsed buffer"
        );
        if let Err(error) = &self.result {
            warn!(%error, "parse failed");
        }
    }

    /// Parses the current text with an empty table and compares the outcome.
    fn verify_incremental(&self) {
        let mut table = MemoizationTable::new(self.text.len());
        let scratch = run(
            &self.grammar,
            &self.text,
            &mut table,
            self.options.merge_terminals,
        );

        let consistent = match (&self.result, &scratch) {
            (Ok(incremental), Ok(scratch)) => incremental.is_equivalent(scratch),
            (Err(incremental), Err(scratch)) => incremental == scratch,
            _ => false,
        };
        if !consistent {
            warn!(
                incremental = %describe(&self.result),
                scratch = %describe(&scratch),
                "incremental parse differs from a full reparse"
            );
        }
        debug_assert!(consistent, "incremental parse differs from a full reparse");
    }

    /// Number of code units in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The whole buffer as a string.
    pub fn string(&self) -> String {
        self.text.string()
    }

    /// The text in `range`.
    pub fn text(&self, range: Range<usize>) -> String {
        self.text.text(range)
    }

    /// The code units in `range`.
    pub fn units(&self, range: Range<usize>) -> Vec<u16> {
        self.text.units(range)
    }

    /// Returns the code unit at `index`, or `None` past the end.
    pub fn utf16_at(&self, index: usize) -> Option<u16> {
        self.text.utf16_at(index)
    }

    /// The underlying piece table.
    pub fn piece_table(&self) -> &PieceTable {
        &self.text
    }

    /// Outcome of the most recent parse.
    pub fn result(&self) -> &Result<NodeRef, ParseError> {
        &self.result
    }

    /// Root of the tree if the most recent parse succeeded.
    pub fn root(&self) -> Option<&NodeRef> {
        self.result.as_ref().ok()
    }

    /// Returns the leaf containing `index`.
    pub fn leaf_node(&self, index: usize) -> Result<AnchoredNode, ParseError> {
        Ok(self.anchored_root()?.leaf_node(index)?)
    }

    /// Returns the nodes from the root down to the leaf containing `index`.
    pub fn path_to(&self, index: usize) -> Result<Vec<AnchoredNode>, ParseError> {
        Ok(self.anchored_root()?.path_to(index)?)
    }

    fn anchored_root(&self) -> Result<AnchoredNode, ParseError> {
        let root = self.result.as_ref().map_err(Clone::clone)?;
        Ok(AnchoredNode::new(Arc::clone(root), 0))
    }

    /// The grammar this buffer parses with.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The options this buffer was created with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The memoization table carried between parses.
    pub fn memoization_table(&self) -> &MemoizationTable {
        &self.memoization_table
    }

    /// Lookup counters accumulated over every parse of this buffer.
    pub fn memoization_statistics(&self) -> MemoizationStatistics {
        self.memoization_table.statistics()
    }

    /// Number of parses run so far, including the initial one.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    /// Range-annotated dump of the tree with the text of every terminal.
    pub fn debug_description(&self) -> String {
        match &self.result {
            Ok(root) => root.debug_description_with(0, |range| self.text.text(range)),
            Err(error) => format!("error: {error}"),
        }
    }
}

/// Runs the start rule over the whole text.
///
/// A fragment root with exactly one child is unwrapped; any other shape is
/// reported as [`ParseError::NoSingleRoot`].
fn run(
    grammar: &Grammar,
    text: &PieceTable,
    table: &mut MemoizationTable,
    merge_terminals: bool,
) -> Result<NodeRef, ParseError> {
    let total = text.len();
    let mut cx = ParseContext::new(text, table).with_merge_terminals(merge_terminals);
    let result = grammar.start().parse(&mut cx, 0);

    if !result.succeeded || result.length != total {
        return Err(ParseError::incomplete(result.length, total));
    }

    match result.node {
        Some(node) if !node.is_fragment() => Ok(node),
        Some(node) if node.children().len() == 1 => Ok(Arc::clone(&node.children()[0])),
        Some(node) => Err(ParseError::NoSingleRoot {
            length: total,
            roots: node.children().len(),
        }),
        None => Err(ParseError::NoSingleRoot {
            length: total,
            roots: 0,
        }),
    }
}

fn describe(result: &Result<NodeRef, ParseError>) -> String {
    match result {
        Ok(root) => root.compact_structure(),
        Err(error) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrammarBuilder;
    use crate::rules::{RuleExt, character_set, dot, in_order, literal};
    use markupkit_ast::NodeType;
    use pretty_assertions::assert_eq;

    const TEXT: NodeType = NodeType::new("text");
    const DOCUMENT: NodeType = NodeType::new("document");

    /// Every unit becomes a memoized one-unit text terminal.
    fn unit_grammar() -> Grammar {
        let mut builder = GrammarBuilder::new();
        let unit = builder.memoize(dot().as_node(TEXT));
        builder.build(unit.zero_or_more())
    }

    #[test]
    fn test_initial_parse() {
        let buffer = IncrementalParsingBuffer::new("ab", unit_grammar());
        let root = buffer.root().unwrap();
        assert_eq!(root.node_type(), TEXT);
        assert_eq!(root.length(), 2);
        assert_eq!(buffer.parse_count(), 1);
    }

    #[test]
    fn test_insertion_reuses_columns_right_of_edit() {
        let mut buffer = IncrementalParsingBuffer::new("ab", unit_grammar());
        let before = buffer.memoization_statistics();
        assert_eq!((before.hits, before.attempts), (0, 3));

        buffer.replace_characters(1..1, "X");

        assert_eq!(buffer.string(), "aXb");
        let root = buffer.root().unwrap();
        assert_eq!(root.node_type(), TEXT);
        assert_eq!(root.length(), 3);
        assert!(root.is_terminal());

        // Column 0 examined up to the edit and was dropped; column 1 is new;
        // the old columns 1 and 2 moved to 2 and 3 and answer from the table.
        let after = buffer.memoization_statistics();
        assert_eq!(after.hits - before.hits, 2);
        assert_eq!(after.attempts - before.attempts, 4);
        assert_eq!(buffer.parse_count(), 2);
    }

    #[test]
    fn test_incomplete_parse_reports_consumed_length() {
        let grammar = GrammarBuilder::new().build(in_order([literal("a"), literal("b")]));
        let buffer = IncrementalParsingBuffer::new("abc", grammar);
        assert_eq!(
            buffer.result().as_ref().unwrap_err(),
            &ParseError::incomplete(2, 3)
        );
        assert!(buffer.root().is_none());
        assert_eq!(
            buffer.debug_description(),
            "error: Incomplete parse: consumed 2 of 3 code units"
        );
    }

    #[test]
    fn test_failed_start_rule_is_incomplete() {
        let grammar = GrammarBuilder::new().build(literal("x"));
        let buffer = IncrementalParsingBuffer::new("a", grammar);
        assert_eq!(
            buffer.result().as_ref().unwrap_err(),
            &ParseError::incomplete(0, 1)
        );
    }

    #[test]
    fn test_multiple_roots() {
        let grammar = GrammarBuilder::new().build(in_order([
            literal("a").as_node(TEXT),
            literal("#").as_node(NodeType::new("hashtag")),
        ]));
        let buffer = IncrementalParsingBuffer::new("a#", grammar);
        assert_eq!(
            buffer.result().as_ref().unwrap_err(),
            &ParseError::NoSingleRoot {
                length: 2,
                roots: 2
            }
        );
    }

    #[test]
    fn test_no_nodes() {
        let grammar = GrammarBuilder::new().build(dot().zero_or_more());
        let buffer = IncrementalParsingBuffer::new("ab", grammar);
        assert_eq!(
            buffer.result().as_ref().unwrap_err(),
            &ParseError::NoSingleRoot {
                length: 2,
                roots: 0
            }
        );
    }

    #[test]
    fn test_error_state_recovers_after_edit() {
        let grammar = GrammarBuilder::new().build(
            character_set("ab")
                .as_node(TEXT)
                .zero_or_more()
                .wrapping_in(DOCUMENT),
        );
        let mut buffer = IncrementalParsingBuffer::new("abc", grammar);
        assert!(buffer.result().is_err());

        buffer.replace_characters(2..3, "");
        assert_eq!(buffer.root().unwrap().compact_structure(), "(document text)");
    }

    #[test]
    fn test_navigation() {
        let buffer = IncrementalParsingBuffer::new("abc", unit_grammar());
        assert_eq!(buffer.leaf_node(1).unwrap().range(), 0..3);
        assert_eq!(buffer.path_to(2).unwrap().len(), 1);
        assert!(matches!(buffer.leaf_node(3), Err(ParseError::Tree(_))));
    }

    #[test]
    fn test_navigation_in_error_state() {
        let grammar = GrammarBuilder::new().build(literal("x"));
        let buffer = IncrementalParsingBuffer::new("a", grammar);
        assert_eq!(buffer.leaf_node(0).unwrap_err(), ParseError::incomplete(0, 1));
    }

    #[test]
    fn test_memoization_disabled() {
        let options = ParserOptions {
            memoize: false,
            ..ParserOptions::default()
        };
        let mut buffer = IncrementalParsingBuffer::with_options("ab", unit_grammar(), options);
        buffer.replace_characters(1..1, "X");
        assert_eq!(buffer.memoization_statistics().hits, 0);
        assert_eq!(buffer.root().unwrap().length(), 3);
    }

    #[test]
    fn test_merging_disabled() {
        let options = ParserOptions {
            merge_terminals: false,
            ..ParserOptions::default()
        };
        let start = dot().as_node(TEXT).zero_or_more().wrapping_in(DOCUMENT);
        let grammar = GrammarBuilder::new().build(start);
        let buffer = IncrementalParsingBuffer::with_options("abc", grammar, options);
        assert_eq!(
            buffer.root().unwrap().compact_structure(),
            "(document text text text)"
        );
    }

    #[test]
    fn test_verification_passes_for_consistent_grammar() {
        let options = ParserOptions {
            verify_incremental: true,
            ..ParserOptions::default()
        };
        let mut buffer = IncrementalParsingBuffer::with_options("abc", unit_grammar(), options);
        buffer.replace_characters(0..2, "xyz");
        buffer.replace_characters(4..4, "!");
        assert_eq!(buffer.string(), "xyzc!");
    }

    #[test]
    fn test_debug_description() {
        let start = choice_of_text_and_digits()
            .zero_or_more()
            .wrapping_in(DOCUMENT);
        let grammar = GrammarBuilder::new().build(start);
        let buffer = IncrementalParsingBuffer::new("ab12c", grammar);
        assert_eq!(
            buffer.debug_description(),
            "document: [0, 5)\n  text: [0, 2) \"ab\"\n  digits: [2, 4) \"12\"\n  text: [4, 5) \"c\""
        );
    }

    fn choice_of_text_and_digits() -> crate::Rule {
        crate::rules::choice([
            character_set("0123456789")
                .one_or_more()
                .as_node(NodeType::new("digits")),
            character_set("abc").as_node(TEXT),
        ])
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_edit_out_of_bounds() {
        let mut buffer = IncrementalParsingBuffer::new("ab", unit_grammar());
        buffer.replace_characters(1..5, "");
    }
}
