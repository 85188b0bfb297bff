//! Outcome of a single rule attempt.

use markupkit_ast::NodeRef;

/// The outcome of applying a rule at one position.
///
/// `length` is how much input the rule consumed; `examined_length` is how far
/// it looked, counted from the same position. A rule may look past what it
/// consumes (lookahead, a failed alternative), so `examined_length >= length`
/// always holds. Peeking at the end of input counts as examining one unit.
#[derive(Debug, Clone)]
pub struct ParsingResult {
    /// Whether the rule matched.
    pub succeeded: bool,
    /// Code units consumed. Zero for failures.
    pub length: usize,
    /// Code units examined to reach the decision.
    pub examined_length: usize,
    /// Node produced by the match, if any.
    pub node: Option<NodeRef>,
}

impl ParsingResult {
    /// A successful match.
    pub fn success(length: usize, examined_length: usize, node: Option<NodeRef>) -> Self {
        debug_assert!(
            examined_length >= length,
            "examined {examined_length} units but consumed {length}"
        );
        Self {
            succeeded: true,
            length,
            examined_length,
            node,
        }
    }

    /// A failed match that looked at `examined_length` units.
    pub fn failure(examined_length: usize) -> Self {
        Self {
            succeeded: false,
            length: 0,
            examined_length,
            node: None,
        }
    }
}
