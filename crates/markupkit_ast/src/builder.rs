//! Mutable node construction.

use std::sync::Arc;

use crate::{NodeRef, NodeType, SyntaxTreeNode};

/// Builds a node one child at a time.
///
/// A builder is the only mutable form of a node. It applies two
/// optimizations while children are appended:
///
/// - a fragment child is not nested: its children are appended in its place
/// - a terminal appended right after a terminal of the same type is merged
///   into one terminal spanning both
///
/// Merging replaces the previous child with a new node; nodes handed in are
/// never modified. [`finish`](Self::finish) freezes the result.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node_type: NodeType,
    length: usize,
    children: Vec<NodeRef>,
    merge_terminals: bool,
}

impl NodeBuilder {
    /// Starts a node of `node_type`.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            length: 0,
            children: Vec::new(),
            merge_terminals: true,
        }
    }

    /// Starts a fragment.
    pub fn fragment() -> Self {
        Self::new(NodeType::FRAGMENT)
    }

    /// Enables or disables merging of adjacent same-type terminals.
    pub fn merge_terminals(mut self, merge: bool) -> Self {
        self.merge_terminals = merge;
        self
    }

    /// Total length of the children appended so far.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if no children have been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child, splicing fragments and merging terminals.
    pub fn append_child(&mut self, child: NodeRef) {
        if child.is_fragment() {
            for grandchild in child.children() {
                self.append_child(Arc::clone(grandchild));
            }
            return;
        }

        self.length += child.length();

        if self.merge_terminals
            && child.is_terminal()
            && let Some(last) = self.children.last_mut()
            && last.is_terminal()
            && last.node_type() == child.node_type()
        {
            *last = SyntaxTreeNode::terminal(child.node_type(), last.length() + child.length());
            return;
        }

        self.children.push(child);
    }

    /// Appends a terminal of `node_type` spanning `length` units.
    pub fn append_terminal(&mut self, node_type: NodeType, length: usize) {
        self.append_child(SyntaxTreeNode::terminal(node_type, length));
    }

    /// Freezes the builder into a shared node.
    pub fn finish(self) -> NodeRef {
        Arc::new(SyntaxTreeNode::from_parts(
            self.node_type,
            self.length,
            self.children,
        ))
    }
}

/// Creates a fragment holding `children`.
impl FromIterator<NodeRef> for NodeBuilder {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        let mut builder = NodeBuilder::fragment();
        for child in iter {
            builder.append_child(child);
        }
        builder
    }
}
