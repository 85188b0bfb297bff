//! SyntaxTreeNode definition.
//!
//! The core tree node type produced by the parser.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::property::PropertyBag;
use crate::visitor::{VisitResult, Visitor, walk_node};
use crate::{NodeBuilder, NodeType, PropertyKey};

/// Shared handle to a frozen node.
pub type NodeRef = Arc<SyntaxTreeNode>;

/// A node in the syntax tree.
///
/// A node knows its type, how many code units it spans and its children. It
/// does not know where it starts: the same node is valid anywhere its text
/// appears, which is what lets unedited subtrees survive a reparse.
///
/// Invariant: when `children` is non-empty, `length` is the sum of the
/// children's lengths. A node without children is a terminal spanning
/// `length` units.
///
/// Nodes are created through [`NodeBuilder`](crate::NodeBuilder) or
/// [`SyntaxTreeNode::terminal`] and are never restructured afterwards.
pub struct SyntaxTreeNode {
    node_type: NodeType,
    length: usize,
    children: Vec<NodeRef>,
    properties: PropertyBag,
}

impl SyntaxTreeNode {
    /// Creates a terminal node.
    pub fn terminal(node_type: NodeType, length: usize) -> NodeRef {
        Arc::new(Self::from_parts(node_type, length, Vec::new()))
    }

    /// Creates a fragment holding `children`, spliced and merged as a builder would.
    pub fn fragment(children: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        children.into_iter().collect::<NodeBuilder>().finish()
    }

    pub(crate) fn from_parts(node_type: NodeType, length: usize, children: Vec<NodeRef>) -> Self {
        Self {
            node_type,
            length,
            children,
            properties: PropertyBag::default(),
        }
    }

    /// The type of this node.
    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Number of code units this node spans.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Child nodes, in document order.
    #[inline]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns true if this node has no children.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if this is a transparent fragment container.
    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.node_type == NodeType::FRAGMENT
    }

    /// Returns the value stored under `K`, if any.
    pub fn property<K: PropertyKey>(&self) -> Option<K::Value> {
        self.properties.get::<K>()
    }

    /// Stores `value` under `K`, returning the previous value.
    pub fn set_property<K: PropertyKey>(&self, value: K::Value) -> Option<K::Value> {
        self.properties.insert::<K>(value)
    }

    /// Removes and returns the value stored under `K`.
    pub fn remove_property<K: PropertyKey>(&self) -> Option<K::Value> {
        self.properties.remove::<K>()
    }

    /// Returns true if any property has been set on this node.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Depth-first pre-order traversal.
    ///
    /// `visitor` receives each node with its absolute start, computed from
    /// `start` (the absolute start of `self`). Returning
    /// [`ControlFlow::Break`](std::ops::ControlFlow::Break) stops the walk.
    pub fn for_each<'a, F>(&'a self, start: usize, visitor: F) -> VisitResult
    where
        F: FnMut(&'a SyntaxTreeNode, usize) -> VisitResult,
    {
        struct FnVisitor<F>(F);

        impl<'a, F> Visitor<'a> for FnVisitor<F>
        where
            F: FnMut(&'a SyntaxTreeNode, usize) -> VisitResult,
        {
            fn enter(&mut self, node: &'a SyntaxTreeNode, start: usize) -> VisitResult {
                (self.0)(node, start)
            }
        }

        walk_node(&mut FnVisitor(visitor), self, start)
    }

    /// Finds the first node of `node_type` in pre-order, with its absolute start.
    pub fn first_descendant(&self, start: usize, node_type: NodeType) -> Option<(&Self, usize)> {
        let mut found = None;
        let _ = self.for_each(start, |node, node_start| {
            if node.node_type == node_type {
                found = Some((node, node_start));
                return VisitResult::Break(());
            }
            VisitResult::Continue(())
        });
        found
    }

    /// Returns true if both trees have the same types, lengths and shape.
    pub fn is_equivalent(&self, other: &SyntaxTreeNode) -> bool {
        self.node_type == other.node_type
            && self.length == other.length
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(left, right)| Arc::ptr_eq(left, right) || left.is_equivalent(right))
    }
}

impl fmt::Debug for SyntaxTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SyntaxTreeNode");
        debug
            .field("type", &self.node_type.name())
            .field("length", &self.length);
        if !self.children.is_empty() {
            debug.field("children", &self.children);
        }
        debug.finish()
    }
}

impl Serialize for SyntaxTreeNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let len = if self.children.is_empty() { 2 } else { 3 };
        let mut state = serializer.serialize_struct("SyntaxTreeNode", len)?;
        state.serialize_field("type", &self.node_type)?;
        state.serialize_field("length", &self.length)?;
        if !self.children.is_empty() {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}
