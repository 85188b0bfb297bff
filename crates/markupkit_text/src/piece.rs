//! Piece descriptors.

/// Which segment of a [`PieceTable`](crate::PieceTable) a piece points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceSource {
    /// The immutable text the table was created with.
    Original,
    /// The append-only segment that receives inserted text.
    Added,
}

/// A contiguous run of code units taken from one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Segment the run lives in.
    pub source: PieceSource,
    /// Start offset within the segment (inclusive).
    pub start: usize,
    /// End offset within the segment (exclusive).
    pub end: usize,
}

impl Piece {
    /// Creates a new piece.
    #[inline]
    pub const fn new(source: PieceSource, start: usize, end: usize) -> Self {
        Self { source, start, end }
    }

    /// Number of code units covered by the piece.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the piece covers no code units.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
