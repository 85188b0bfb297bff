//! Grammar assembly and rule memoization.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{ParseContext, ParsingResult, ParsingRule, Rule, RuleId};

/// Hands out memoization ids and assembles a [`Grammar`].
///
/// Every rule passed through [`memoize`](Self::memoize) gets its own dense
/// [`RuleId`], so memoization columns can be plain vectors.
///
/// # Example
///
/// ```rust
/// use markupkit_ast::NodeType;
/// use markupkit_parser::GrammarBuilder;
/// use markupkit_parser::rules::{dot, RuleExt};
///
/// let mut builder = GrammarBuilder::new();
/// let text = builder.memoize(dot().as_node(NodeType::new("text")));
/// let grammar = builder.build(text.zero_or_more());
/// assert_eq!(grammar.memoized_rule_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    next_id: u32,
}

impl GrammarBuilder {
    /// Creates a builder with no memoized rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `rule` so its results are cached per position.
    pub fn memoize(&mut self, rule: Rule) -> Rule {
        let id = RuleId(self.next_id);
        self.next_id += 1;
        Arc::new(Memoize { id, rule })
    }

    /// Finishes the grammar with `start` as its top-level rule.
    pub fn build(self, start: Rule) -> Grammar {
        Grammar {
            start,
            memoized_rule_count: self.next_id as usize,
        }
    }
}

/// A complete grammar: a start rule plus the number of memoized rules in it.
#[derive(Clone)]
pub struct Grammar {
    start: Rule,
    memoized_rule_count: usize,
}

impl Grammar {
    /// The top-level rule.
    pub fn start(&self) -> &Rule {
        &self.start
    }

    /// Number of ids handed out by the builder.
    pub fn memoized_rule_count(&self) -> usize {
        self.memoized_rule_count
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("memoized_rule_count", &self.memoized_rule_count)
            .finish_non_exhaustive()
    }
}

/// Consults the memoization table before running the wrapped rule.
#[derive(Debug)]
struct Memoize {
    id: RuleId,
    rule: Rule,
}

impl ParsingRule for Memoize {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        if let Some(result) = cx.memoization_table().memoized_result(self.id, index) {
            trace!(rule = %self.id, index, "memoization hit");
            return result;
        }

        let result = self.rule.parse(cx, index);
        // Only results that looked at some input can be told apart after an edit.
        if result.examined_length > 0 {
            cx.memoization_table()
                .memoize_result(result.clone(), self.id, index);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoizationTable;
    use crate::rules::{RuleExt, dot, literal};
    use markupkit_ast::NodeType;
    use markupkit_text::PieceTable;

    #[test]
    fn test_ids_are_dense() {
        let mut builder = GrammarBuilder::new();
        builder.memoize(dot());
        builder.memoize(literal("a"));
        let grammar = builder.build(dot());
        assert_eq!(grammar.memoized_rule_count(), 2);
    }

    #[test]
    fn test_second_lookup_hits() {
        let mut builder = GrammarBuilder::new();
        let rule = builder.memoize(dot().as_node(NodeType::new("text")));

        let text = PieceTable::new("ab");
        let mut table = MemoizationTable::new(text.len());
        let mut cx = ParseContext::new(&text, &mut table);

        let first = rule.parse(&mut cx, 1);
        let second = rule.parse(&mut cx, 1);
        assert!(Arc::ptr_eq(
            first.node.as_ref().unwrap(),
            second.node.as_ref().unwrap()
        ));

        let statistics = table.statistics();
        assert_eq!(statistics.hits, 1);
        assert_eq!(statistics.attempts, 2);
        assert_eq!(table.entry_count(), 1);
    }

    #[test]
    fn test_failures_are_memoized() {
        let mut builder = GrammarBuilder::new();
        let rule = builder.memoize(literal("x"));

        let text = PieceTable::new("ab");
        let mut table = MemoizationTable::new(text.len());
        let mut cx = ParseContext::new(&text, &mut table);

        assert!(!rule.parse(&mut cx, 0).succeeded);
        assert!(!rule.parse(&mut cx, 0).succeeded);
        assert_eq!(table.statistics().hits, 1);
    }
}
