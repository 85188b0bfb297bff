//! Visitor pattern for syntax tree traversal.
//!
//! # Overview
//!
//! - [`Visitor`] - Read-only traversal trait with enter/leave hooks
//! - [`walk_node`] - Depth-first walk that computes absolute starts
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use markupkit_ast::{NodeBuilder, NodeType, SyntaxTreeNode};
//! use markupkit_ast::visitor::{Visitor, VisitResult, walk_node};
//!
//! struct LeafRanges(Vec<(usize, usize)>);
//!
//! impl<'a> Visitor<'a> for LeafRanges {
//!     fn enter(&mut self, node: &'a SyntaxTreeNode, start: usize) -> VisitResult {
//!         if node.is_terminal() {
//!             self.0.push((start, start + node.length()));
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut paragraph = NodeBuilder::new(NodeType::new("paragraph"));
//! paragraph.append_terminal(NodeType::new("text"), 3);
//! paragraph.append_terminal(NodeType::new("hashtag"), 2);
//! let root = paragraph.finish();
//!
//! let mut ranges = LeafRanges(Vec::new());
//! let _ = walk_node(&mut ranges, &root, 0);
//! assert_eq!(ranges.0, vec![(0, 3), (3, 5)]);
//! ```

mod walk;

use std::ops::ControlFlow;

use crate::SyntaxTreeNode;

pub use walk::walk_node;

/// Result of visiting a node. `Break` stops the traversal.
pub type VisitResult = ControlFlow<()>;

/// Read-only syntax tree visitor.
///
/// Both hooks receive the node's absolute start.
pub trait Visitor<'a> {
    /// Called before the node's children are visited.
    fn enter(&mut self, _node: &'a SyntaxTreeNode, _start: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after the node's children are visited.
    fn leave(&mut self, _node: &'a SyntaxTreeNode, _start: usize) -> VisitResult {
        ControlFlow::Continue(())
    }
}
