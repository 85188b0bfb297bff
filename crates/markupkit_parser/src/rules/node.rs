//! Rules that shape the syntax tree.

use markupkit_ast::{NodeType, SyntaxTreeNode};

use super::combinator::Children;
use crate::{ParseContext, ParsingResult, ParsingRule, Rule};

/// Replaces whatever the inner rule produced with one terminal.
#[derive(Debug)]
pub struct AsNode {
    rule: Rule,
    node_type: NodeType,
}

impl AsNode {
    pub(crate) fn new(rule: Rule, node_type: NodeType) -> Self {
        Self { rule, node_type }
    }
}

impl ParsingRule for AsNode {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let result = self.rule.parse(cx, index);
        if !result.succeeded {
            return result;
        }
        let node = (result.length > 0)
            .then(|| SyntaxTreeNode::terminal(self.node_type, result.length));
        ParsingResult { node, ..result }
    }
}

/// Wraps the inner rule's nodes in a node of the given type.
///
/// If the inner rule produced no nodes, the result is a terminal of the
/// wrapping type. A successful match always produces a node, even an empty one.
#[derive(Debug)]
pub struct WrappingIn {
    rule: Rule,
    node_type: NodeType,
}

impl WrappingIn {
    pub(crate) fn new(rule: Rule, node_type: NodeType) -> Self {
        Self { rule, node_type }
    }
}

impl ParsingRule for WrappingIn {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let result = self.rule.parse(cx, index);
        if !result.succeeded {
            return result;
        }

        let node = if result.node.is_some() {
            let mut children = Children::new(cx.node_builder(self.node_type));
            children.push(&result);
            children.finish()
        } else {
            Some(SyntaxTreeNode::terminal(self.node_type, result.length))
        };
        debug_assert!(node.as_ref().is_none_or(|node| node.length() == result.length));

        ParsingResult { node, ..result }
    }
}
