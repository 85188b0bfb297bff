//! # markupkit_ast
//!
//! Syntax tree definitions for MarkupKit.
//!
//! Nodes store a type, a length and their children, never an absolute
//! position. This lets a subtree built during one parse be reused verbatim
//! by the next parse even after text before it has been edited. Absolute
//! positions are recovered on demand with [`AnchoredNode`].
//!
//! ## Architecture
//!
//! - Nodes are built with a [`NodeBuilder`] and frozen into a shared
//!   [`NodeRef`] (`Arc<SyntaxTreeNode>`); a frozen node is never restructured
//! - Fragment nodes are transparent: appending one splices its children
//! - Adjacent terminals of the same type are merged while building
//! - Per-node metadata lives in a lazily allocated property bag
//!
//! ## Example
//!
//! ```rust
//! use markupkit_ast::{AnchoredNode, NodeBuilder, NodeType, SyntaxTreeNode};
//!
//! const TEXT: NodeType = NodeType::new("text");
//! const EMPHASIS: NodeType = NodeType::new("emphasis");
//!
//! let mut emphasis = NodeBuilder::new(EMPHASIS);
//! emphasis.append_child(SyntaxTreeNode::terminal(TEXT, 2));
//! emphasis.append_child(SyntaxTreeNode::terminal(TEXT, 3));
//!
//! let mut paragraph = NodeBuilder::new(NodeType::new("paragraph"));
//! paragraph.append_child(SyntaxTreeNode::terminal(TEXT, 4));
//! paragraph.append_child(emphasis.finish());
//! let root = paragraph.finish();
//!
//! assert_eq!(root.compact_structure(), "(paragraph text (emphasis text))");
//!
//! let leaf = AnchoredNode::new(root, 0).leaf_node(6).unwrap();
//! assert_eq!(leaf.range(), 4..9);
//! ```

mod anchored;
mod builder;
mod dump;
mod error;
mod node;
mod node_type;
mod property;
pub mod visitor;

pub use anchored::AnchoredNode;
pub use builder::NodeBuilder;
pub use error::TreeError;
pub use node::{NodeRef, SyntaxTreeNode};
pub use node_type::NodeType;
pub use property::{PropertyKey, PropertyType, PropertyValue};

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor};
