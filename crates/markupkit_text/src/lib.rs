//! # markupkit_text
//!
//! Editable text storage for MarkupKit.
//!
//! Text is stored as UTF-16 code units in a [`PieceTable`]: an immutable
//! original segment plus an append-only added segment, stitched together by
//! a list of [`Piece`] descriptors. Edits rewrite the piece list and never
//! copy the document.
//!
//! ## Example
//!
//! ```rust
//! use markupkit_text::PieceTable;
//!
//! let mut table = PieceTable::new("Hello world");
//! table.replace_characters(5..11, ", piece table");
//!
//! assert_eq!(table.string(), "Hello, piece table");
//! assert_eq!(table.original_text(), "Hello world");
//! ```

mod piece;
mod piece_table;

pub use piece::{Piece, PieceSource};
pub use piece_table::{PieceTable, Units};
