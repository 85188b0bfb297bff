//! Rule combinators.
//!
//! Primitive rules look at code units and produce no nodes. Nodes come from
//! [`RuleExt::as_node`] (one terminal for everything matched) and
//! [`RuleExt::wrapping_in`] (a parent for the nodes produced inside).
//! Sequences and repetitions hand their nodes up as a fragment that the
//! receiving parent splices in.
//!
//! # Example
//!
//! ```rust
//! use markupkit_ast::NodeType;
//! use markupkit_parser::rules::{character, in_order, literal, RuleExt};
//!
//! const HASHTAG: NodeType = NodeType::new("hashtag");
//!
//! let word = character("word", |unit| {
//!     char::from_u32(u32::from(unit)).is_some_and(char::is_alphanumeric)
//! });
//! let hashtag = in_order([literal("#"), word.one_or_more()]).as_node(HASHTAG);
//! ```

mod combinator;
mod node;
mod primitive;

use std::sync::Arc;

use markupkit_ast::NodeType;

pub use combinator::{Choice, InOrder, Lookahead, Repeat};
pub use node::{AsNode, WrappingIn};
pub use primitive::{Character, Dot, EndOfInput, Literal};

use crate::{ParsingRule, Rule};

/// Wraps any rule implementation into a shared [`Rule`].
pub fn rule(rule: impl ParsingRule + 'static) -> Rule {
    Arc::new(rule)
}

/// Matches one code unit accepted by `predicate`. `name` appears in debug output.
pub fn character(
    name: impl Into<String>,
    predicate: impl Fn(u16) -> bool + Send + Sync + 'static,
) -> Rule {
    rule(Character::new(name, predicate))
}

/// Matches one code unit from `set`.
pub fn character_set(set: &str) -> Rule {
    let units: Vec<u16> = set.encode_utf16().collect();
    rule(Character::new(format!("[{set}]"), move |unit| {
        units.contains(&unit)
    }))
}

/// Matches `text` exactly.
pub fn literal(text: &str) -> Rule {
    rule(Literal::new(text))
}

/// Matches any single code unit.
pub fn dot() -> Rule {
    rule(Dot)
}

/// Matches the end of input without consuming.
pub fn end_of_input() -> Rule {
    rule(EndOfInput)
}

/// Matches every rule of `rules` in order.
pub fn in_order(rules: impl IntoIterator<Item = Rule>) -> Rule {
    rule(InOrder::new(rules.into_iter().collect()))
}

/// Matches the first of `rules` that succeeds.
pub fn choice(rules: impl IntoIterator<Item = Rule>) -> Rule {
    rule(Choice::new(rules.into_iter().collect()))
}

/// Fluent constructors on [`Rule`].
pub trait RuleExt {
    /// Consumes what this rule matches as one terminal of `node_type`.
    fn as_node(&self, node_type: NodeType) -> Rule;

    /// Wraps the nodes this rule produces in a node of `node_type`.
    fn wrapping_in(&self, node_type: NodeType) -> Rule;

    /// Matches this rule between `min` and `max` times.
    fn repeat(&self, min: usize, max: usize) -> Rule;

    /// Matches this rule any number of times.
    fn zero_or_more(&self) -> Rule {
        self.repeat(0, usize::MAX)
    }

    /// Matches this rule at least once.
    fn one_or_more(&self) -> Rule {
        self.repeat(1, usize::MAX)
    }

    /// Matches this rule at most once.
    fn optional(&self) -> Rule {
        self.repeat(0, 1)
    }

    /// Succeeds without consuming if this rule would match.
    fn assert(&self) -> Rule;

    /// Succeeds without consuming if this rule would not match.
    fn not(&self) -> Rule;
}

impl RuleExt for Rule {
    fn as_node(&self, node_type: NodeType) -> Rule {
        rule(AsNode::new(Arc::clone(self), node_type))
    }

    fn wrapping_in(&self, node_type: NodeType) -> Rule {
        rule(WrappingIn::new(Arc::clone(self), node_type))
    }

    fn repeat(&self, min: usize, max: usize) -> Rule {
        rule(Repeat::new(Arc::clone(self), min, max))
    }

    fn assert(&self) -> Rule {
        rule(Lookahead::new(Arc::clone(self), false))
    }

    fn not(&self) -> Rule {
        rule(Lookahead::new(Arc::clone(self), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoizationTable, ParseContext, ParsingResult};
    use markupkit_text::PieceTable;
    use rstest::rstest;

    const TEXT: NodeType = NodeType::new("text");
    const HASHTAG: NodeType = NodeType::new("hashtag");
    const PARAGRAPH: NodeType = NodeType::new("paragraph");

    fn run(rule: &Rule, text: &str, index: usize) -> ParsingResult {
        let table = PieceTable::new(text);
        let mut memo = MemoizationTable::new(table.len());
        let mut cx = ParseContext::new(&table, &mut memo);
        rule.parse(&mut cx, index)
    }

    fn summary(result: &ParsingResult) -> (bool, usize, usize) {
        (result.succeeded, result.length, result.examined_length)
    }

    #[rstest]
    #[case::match_at_start(literal("ab"), "abc", 0, (true, 2, 2))]
    #[case::mismatch_second_unit(literal("ab"), "axc", 0, (false, 0, 2))]
    #[case::literal_hits_end(literal("abc"), "ab", 0, (false, 0, 3))]
    #[case::dot_at_end(dot(), "ab", 2, (false, 0, 1))]
    #[case::end_of_input_matches(end_of_input(), "ab", 2, (true, 0, 1))]
    #[case::end_of_input_fails(end_of_input(), "ab", 1, (false, 0, 1))]
    #[case::set_member(character_set("#*"), "*", 0, (true, 1, 1))]
    #[case::set_non_member(character_set("#*"), "a", 0, (false, 0, 1))]
    fn test_primitives(
        #[case] rule: Rule,
        #[case] text: &str,
        #[case] index: usize,
        #[case] expected: (bool, usize, usize),
    ) {
        assert_eq!(summary(&run(&rule, text, index)), expected);
    }

    #[test]
    fn test_in_order_examines_failed_tail() {
        let rule = in_order([literal("a"), literal("bc")]);
        assert_eq!(summary(&run(&rule, "abx", 0)), (false, 0, 3));
        assert_eq!(summary(&run(&rule, "abc", 0)), (true, 3, 3));
    }

    #[test]
    fn test_choice_keeps_farthest_examined() {
        let rule = choice([literal("abc"), literal("a")]);
        let result = run(&rule, "abx", 0);
        assert_eq!(summary(&result), (true, 1, 3));
    }

    #[test]
    fn test_repeat_bounds() {
        let a = literal("a");
        assert_eq!(summary(&run(&a.zero_or_more(), "aab", 0)), (true, 2, 3));
        assert_eq!(summary(&run(&a.one_or_more(), "b", 0)), (false, 0, 1));
        assert_eq!(summary(&run(&a.optional(), "aa", 0)), (true, 1, 1));
        assert_eq!(summary(&run(&a.repeat(2, 3), "aaaa", 0)), (true, 3, 3));
    }

    #[test]
    fn test_repeat_stops_on_empty_match() {
        let rule = end_of_input().zero_or_more();
        assert_eq!(summary(&run(&rule, "", 0)), (true, 0, 1));
    }

    #[test]
    fn test_lookahead_consumes_nothing() {
        let rule = literal("ab");
        assert_eq!(summary(&run(&rule.assert(), "ab", 0)), (true, 0, 2));
        assert_eq!(summary(&run(&rule.not(), "ab", 0)), (false, 0, 2));
        assert_eq!(summary(&run(&rule.not(), "ax", 0)), (true, 0, 2));
    }

    #[test]
    fn test_as_node_absorbs() {
        let rule = in_order([literal("#"), dot().one_or_more()]).as_node(HASHTAG);
        let node = run(&rule, "#tag", 0).node.unwrap();
        assert_eq!(node.node_type(), HASHTAG);
        assert_eq!(node.length(), 4);
        assert!(node.is_terminal());
    }

    #[test]
    fn test_single_unit_terminals_merge() {
        let rule = dot().as_node(TEXT).one_or_more().wrapping_in(PARAGRAPH);
        let node = run(&rule, "abcd", 0).node.unwrap();
        assert_eq!(node.compact_structure(), "(paragraph text)");
        assert_eq!(node.children()[0].length(), 4);
    }

    #[test]
    fn test_wrapping_fills_unlabeled_consumption() {
        let rule = in_order([literal("*"), dot().as_node(TEXT), literal("*")])
            .wrapping_in(NodeType::new("emphasis"));
        let node = run(&rule, "*x*", 0).node.unwrap();
        assert_eq!(node.compact_structure(), "(emphasis anonymous text anonymous)");
        assert_eq!(node.length(), 3);
    }

    #[test]
    fn test_wrapping_without_inner_nodes_is_terminal() {
        let rule = literal("---").wrapping_in(NodeType::new("rule"));
        let node = run(&rule, "---", 0).node.unwrap();
        assert!(node.is_terminal());
        assert_eq!(node.length(), 3);
    }

    #[test]
    fn test_sequence_without_nodes_produces_none() {
        let rule = in_order([literal("a"), literal("b")]);
        assert!(run(&rule, "ab", 0).node.is_none());
    }
}
