//! Tree walking.

use super::{VisitResult, Visitor};
use crate::SyntaxTreeNode;

/// Walks `node` depth-first, pre-order, starting at absolute offset `start`.
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a SyntaxTreeNode, start: usize) -> VisitResult
where
    V: Visitor<'a> + ?Sized,
{
    visitor.enter(node, start)?;
    let mut child_start = start;
    for child in node.children() {
        walk_node(visitor, child, child_start)?;
        child_start += child.length();
    }
    visitor.leave(node, start)
}
