//! Nodes paired with their absolute position.

use std::ops::Range;
use std::sync::Arc;

use crate::{NodeRef, TreeError};

/// A node together with the absolute offset where it starts.
///
/// Anchored nodes are computed while walking down from a root and are not
/// stored anywhere; the offset is only meaningful for the tree they were
/// derived from.
#[derive(Debug, Clone)]
pub struct AnchoredNode {
    /// The node.
    pub node: NodeRef,
    /// Absolute start of the node.
    pub start: usize,
}

impl AnchoredNode {
    /// Anchors `node` at `start`.
    pub fn new(node: NodeRef, start: usize) -> Self {
        Self { node, start }
    }

    /// Absolute end (exclusive) of the node.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.node.length()
    }

    /// Absolute range covered by the node.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Anchored children, in document order.
    pub fn children(&self) -> impl Iterator<Item = AnchoredNode> + '_ {
        self.node
            .children()
            .iter()
            .scan(self.start, |start, child| {
                let anchored = AnchoredNode::new(Arc::clone(child), *start);
                *start += child.length();
                Some(anchored)
            })
    }

    /// Returns every node from this one down to the leaf containing `index`.
    ///
    /// The first element is `self`, the last is the leaf.
    pub fn path_to(&self, index: usize) -> Result<Vec<AnchoredNode>, TreeError> {
        if !self.range().contains(&index) {
            return Err(TreeError::out_of_range(index, self.start, self.end()));
        }

        let mut path = vec![self.clone()];
        loop {
            let current = &path[path.len() - 1];
            let Some(next) = current
                .children()
                .find(|child| child.range().contains(&index))
            else {
                break;
            };
            path.push(next);
        }
        Ok(path)
    }

    /// Returns the leaf containing `index`.
    pub fn leaf_node(&self, index: usize) -> Result<AnchoredNode, TreeError> {
        let mut path = self.path_to(index)?;
        // path_to always returns at least `self`.
        Ok(path.swap_remove(path.len() - 1))
    }
}
