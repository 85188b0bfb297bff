//! Rules composed from other rules.
//!
//! Every combinator reports the farthest unit any of its sub-attempts looked
//! at as its examined length, including attempts that failed.

use markupkit_ast::{NodeBuilder, NodeRef, NodeType, SyntaxTreeNode};

use crate::{ParseContext, ParsingResult, ParsingRule, Rule};

/// Collects the nodes of consecutive matches into a fragment.
///
/// Consumption that produced no node is recorded as an
/// [`ANONYMOUS`](NodeType::ANONYMOUS) terminal so the fragment's length
/// always equals what was consumed. If no sub-match produced a node the
/// collector produces none either.
pub(crate) struct Children {
    builder: NodeBuilder,
    has_nodes: bool,
}

impl Children {
    pub(crate) fn new(builder: NodeBuilder) -> Self {
        Self {
            builder,
            has_nodes: false,
        }
    }

    pub(crate) fn push(&mut self, result: &ParsingResult) {
        match &result.node {
            Some(node) => {
                self.has_nodes = true;
                self.builder.append_child(NodeRef::clone(node));
            }
            None if result.length > 0 => {
                self.builder
                    .append_child(SyntaxTreeNode::terminal(NodeType::ANONYMOUS, result.length));
            }
            None => {}
        }
    }

    pub(crate) fn finish(self) -> Option<NodeRef> {
        self.has_nodes.then(|| self.builder.finish())
    }
}

/// Matches each rule in turn.
#[derive(Debug)]
pub struct InOrder {
    rules: Vec<Rule>,
}

impl InOrder {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl ParsingRule for InOrder {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let mut length = 0;
        let mut examined_length = 0;
        let mut children = Children::new(cx.fragment_builder());

        for rule in &self.rules {
            let result = rule.parse(cx, index + length);
            examined_length = examined_length.max(length + result.examined_length);
            if !result.succeeded {
                return ParsingResult::failure(examined_length);
            }
            children.push(&result);
            length += result.length;
        }

        ParsingResult::success(length, examined_length, children.finish())
    }
}

/// Matches the first rule that succeeds.
#[derive(Debug)]
pub struct Choice {
    rules: Vec<Rule>,
}

impl Choice {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl ParsingRule for Choice {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let mut examined_length = 0;
        for rule in &self.rules {
            let result = rule.parse(cx, index);
            examined_length = examined_length.max(result.examined_length);
            if result.succeeded {
                return ParsingResult {
                    examined_length,
                    ..result
                };
            }
        }
        ParsingResult::failure(examined_length)
    }
}

/// Matches a rule between `min` and `max` times.
///
/// A repetition stops after a zero-length match, which it counts once.
#[derive(Debug)]
pub struct Repeat {
    rule: Rule,
    min: usize,
    max: usize,
}

impl Repeat {
    pub(crate) fn new(rule: Rule, min: usize, max: usize) -> Self {
        Self { rule, min, max }
    }
}

impl ParsingRule for Repeat {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let mut length = 0;
        let mut examined_length = 0;
        let mut count = 0;
        let mut children = Children::new(cx.fragment_builder());

        while count < self.max {
            let result = self.rule.parse(cx, index + length);
            examined_length = examined_length.max(length + result.examined_length);
            if !result.succeeded {
                break;
            }
            children.push(&result);
            length += result.length;
            count += 1;
            if result.length == 0 {
                break;
            }
        }

        if count < self.min {
            return ParsingResult::failure(examined_length);
        }
        ParsingResult::success(length, examined_length, children.finish())
    }
}

/// Zero-width lookahead: succeeds when the inner rule does (or does not).
#[derive(Debug)]
pub struct Lookahead {
    rule: Rule,
    negated: bool,
}

impl Lookahead {
    pub(crate) fn new(rule: Rule, negated: bool) -> Self {
        Self { rule, negated }
    }
}

impl ParsingRule for Lookahead {
    fn parse(&self, cx: &mut ParseContext<'_>, index: usize) -> ParsingResult {
        let result = self.rule.parse(cx, index);
        if result.succeeded != self.negated {
            ParsingResult::success(0, result.examined_length, None)
        } else {
            ParsingResult::failure(result.examined_length)
        }
    }
}
