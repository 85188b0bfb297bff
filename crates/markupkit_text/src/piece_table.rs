//! UTF-16 piece table.

use std::cell::Cell;
use std::fmt;
use std::ops::Range;

use tracing::trace;

use crate::{Piece, PieceSource};

/// An editable sequence of UTF-16 code units.
///
/// The table owns an immutable `original` segment and an append-only `added`
/// segment. The visible contents are the concatenation of the slices named by
/// [`pieces`](Self::pieces), in order. Edits only rewrite the piece list, so
/// the original text is always recoverable with [`original_text`](Self::original_text).
///
/// All indices are UTF-16 code unit offsets into the visible contents.
#[derive(Clone)]
pub struct PieceTable {
    original: Vec<u16>,
    added: Vec<u16>,
    pieces: Vec<Piece>,
    len: usize,
    /// Index and absolute start of the most recently resolved piece.
    hint: Cell<(usize, usize)>,
}

impl PieceTable {
    /// Creates a table whose original segment holds `text`.
    pub fn new(text: &str) -> Self {
        Self::from_units(text.encode_utf16().collect())
    }

    /// Creates a table from raw UTF-16 code units.
    pub fn from_units(original: Vec<u16>) -> Self {
        let len = original.len();
        let pieces = if len == 0 {
            Vec::new()
        } else {
            vec![Piece::new(PieceSource::Original, 0, len)]
        };
        Self {
            original,
            added: Vec::new(),
            pieces,
            len,
            hint: Cell::new((0, 0)),
        }
    }

    /// Number of visible code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table has no visible contents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current piece list.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The code units the table was created with, untouched by any edit.
    pub fn original_units(&self) -> &[u16] {
        &self.original
    }

    /// The text the table was created with, untouched by any edit.
    pub fn original_text(&self) -> String {
        String::from_utf16_lossy(&self.original)
    }

    /// Returns the code unit at `index`, or `None` past the end.
    pub fn utf16_at(&self, index: usize) -> Option<u16> {
        if index >= self.len {
            return None;
        }
        let (piece_index, piece_start) = self.locate(index);
        let piece = &self.pieces[piece_index];
        Some(self.segment(piece.source)[piece.start + index - piece_start])
    }

    /// Copies the code units in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    pub fn units(&self, range: Range<usize>) -> Vec<u16> {
        self.check_range(&range);
        let mut units = Vec::with_capacity(range.len());
        if range.is_empty() {
            return units;
        }

        let (mut piece_index, mut piece_start) = self.locate(range.start);
        while units.len() < range.len() {
            let piece = &self.pieces[piece_index];
            let from = range.start.max(piece_start) - piece_start;
            let to = (range.end - piece_start).min(piece.len());
            units.extend_from_slice(&self.slice(piece)[from..to]);
            piece_start += piece.len();
            piece_index += 1;
        }
        units
    }

    /// Returns the text in `range`, replacing unpaired surrogates.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    pub fn text(&self, range: Range<usize>) -> String {
        String::from_utf16_lossy(&self.units(range))
    }

    /// Returns the full visible contents.
    pub fn string(&self) -> String {
        self.text(0..self.len)
    }

    /// Iterates over the visible code units.
    pub fn iter(&self) -> Units<'_> {
        Units {
            table: self,
            piece_index: 0,
            offset: 0,
        }
    }

    /// Replaces the code units in `range` with `text`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    pub fn replace_characters(&mut self, range: Range<usize>, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.replace_units(range, &units);
    }

    /// Replaces the code units in `range` with `units`.
    ///
    /// Pieces overlapping the range are split at its boundaries; inserted units
    /// are appended to the added segment. An insertion that continues the
    /// previous insertion extends the existing added piece.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    pub fn replace_units(&mut self, range: Range<usize>, units: &[u16]) {
        self.check_range(&range);

        let (first, first_start) = self.locate(range.start);
        let mut replacement = Vec::with_capacity(3);

        if first < self.pieces.len() && range.start > first_start {
            let piece = self.pieces[first];
            replacement.push(Piece {
                end: piece.start + (range.start - first_start),
                ..piece
            });
        }

        if !units.is_empty() {
            let added_start = self.added.len();
            self.added.extend_from_slice(units);
            let added_end = self.added.len();

            let continues_previous = replacement.is_empty()
                && first > 0
                && self.pieces[first - 1].source == PieceSource::Added
                && self.pieces[first - 1].end == added_start;
            if continues_previous {
                self.pieces[first - 1].end = added_end;
            } else {
                replacement.push(Piece::new(PieceSource::Added, added_start, added_end));
            }
        }

        let mut last = first;
        let mut piece_start = first_start;
        while last < self.pieces.len() {
            let piece = self.pieces[last];
            let piece_end = piece_start + piece.len();
            if piece_end > range.end {
                if range.end > piece_start {
                    replacement.push(Piece {
                        start: piece.start + (range.end - piece_start),
                        ..piece
                    });
                    last += 1;
                }
                break;
            }
            piece_start = piece_end;
            last += 1;
        }

        self.pieces.splice(first..last, replacement);
        self.len = self.len - range.len() + units.len();
        self.hint.set((0, 0));

        trace!(
            start = range.start,
            removed = range.len(),
            inserted = units.len(),
            pieces = self.pieces.len(),
            "replaced characters"
        );
    }

    fn check_range(&self, range: &Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "range {:?} out of bounds for piece table of length {}",
            range,
            self.len
        );
    }

    fn segment(&self, source: PieceSource) -> &[u16] {
        match source {
            PieceSource::Original => &self.original,
            PieceSource::Added => &self.added,
        }
    }

    fn slice(&self, piece: &Piece) -> &[u16] {
        &self.segment(piece.source)[piece.start..piece.end]
    }

    /// Finds the piece containing `index`, returning its position in the piece
    /// list and its absolute start. For `index == len` this is one past the
    /// last piece.
    fn locate(&self, index: usize) -> (usize, usize) {
        let (mut piece_index, mut piece_start) = self.hint.get();
        if piece_start > index || piece_index > self.pieces.len() {
            piece_index = 0;
            piece_start = 0;
        }

        while piece_index < self.pieces.len() {
            let piece_end = piece_start + self.pieces[piece_index].len();
            if index < piece_end {
                self.hint.set((piece_index, piece_start));
                return (piece_index, piece_start);
            }
            piece_start = piece_end;
            piece_index += 1;
        }
        (piece_index, piece_start)
    }
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for PieceTable {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.iter()) {
            fmt::Write::write_char(f, c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceTable")
            .field("len", &self.len)
            .field("pieces", &self.pieces)
            .finish_non_exhaustive()
    }
}

/// Iterator over the visible code units of a [`PieceTable`].
#[derive(Debug, Clone)]
pub struct Units<'a> {
    table: &'a PieceTable,
    piece_index: usize,
    offset: usize,
}

impl Iterator for Units<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        loop {
            let piece = self.table.pieces.get(self.piece_index)?;
            if self.offset < piece.len() {
                let unit = self.table.slice(piece)[self.offset];
                self.offset += 1;
                return Some(unit);
            }
            self.piece_index += 1;
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck::QuickCheck;
    use rstest::rstest;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_new_table() {
        let table = PieceTable::new("hello");
        assert_eq!(table.len(), 5);
        assert_eq!(table.string(), "hello");
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let table = PieceTable::default();
        assert!(table.is_empty());
        assert!(table.pieces().is_empty());
        assert_eq!(table.string(), "");
        assert_eq!(table.utf16_at(0), None);
    }

    #[rstest]
    #[case::insert_middle("ab", 1..1, "X", "aXb")]
    #[case::insert_start("ab", 0..0, "X", "Xab")]
    #[case::insert_end("ab", 2..2, "X", "abX")]
    #[case::delete_middle("#a #b", 2..3, "", "#a#b")]
    #[case::delete_all("hello", 0..5, "", "")]
    #[case::replace_span("Hello world", 6..11, "there", "Hello there")]
    #[case::insert_into_empty("", 0..0, "abc", "abc")]
    #[case::replace_all("abc", 0..3, "xyz", "xyz")]
    fn test_replace_characters(
        #[case] initial: &str,
        #[case] range: Range<usize>,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let mut table = PieceTable::new(initial);
        table.replace_characters(range, text);
        assert_eq!(table.string(), expected);
        assert_eq!(table.len(), utf16(expected).len());
        assert_eq!(table.original_text(), initial);
    }

    #[test]
    fn test_edits_spanning_pieces() {
        let mut table = PieceTable::new("0123456789");
        table.replace_characters(3..3, "abc");
        table.replace_characters(8..8, "xyz");
        assert_eq!(table.string(), "012abc34xyz56789");

        table.replace_characters(4..10, "-");
        assert_eq!(table.string(), "012a-z56789");
        assert!(table.pieces().iter().all(|piece| !piece.is_empty()));
    }

    #[test]
    fn test_sequential_typing_extends_piece() {
        let mut table = PieceTable::new("ab");
        table.replace_characters(1..1, "x");
        table.replace_characters(2..2, "y");
        table.replace_characters(3..3, "z");

        assert_eq!(table.string(), "axyzb");
        assert_eq!(
            table.pieces(),
            &[
                Piece::new(PieceSource::Original, 0, 1),
                Piece::new(PieceSource::Added, 0, 3),
                Piece::new(PieceSource::Original, 1, 2),
            ]
        );
    }

    #[test]
    fn test_original_segment_is_never_rewritten() {
        let mut table = PieceTable::new("original");
        table.replace_characters(0..8, "changed");
        table.replace_characters(0..0, ">> ");
        assert_eq!(table.string(), ">> changed");
        assert_eq!(table.original_text(), "original");
        assert_eq!(table.original_units(), utf16("original").as_slice());
    }

    #[test]
    fn test_utf16_at() {
        let mut table = PieceTable::new("abc");
        table.replace_characters(1..2, "XY");
        let read: Vec<Option<u16>> = (0..5).map(|i| table.utf16_at(i)).collect();
        assert_eq!(
            read,
            vec![
                Some(b'a' as u16),
                Some(b'X' as u16),
                Some(b'Y' as u16),
                Some(b'c' as u16),
                None,
            ]
        );
        // Reading backwards must not be confused by the cached hint.
        assert_eq!(table.utf16_at(0), Some(b'a' as u16));
    }

    #[test]
    fn test_units_subrange() {
        let mut table = PieceTable::new("hello world");
        table.replace_characters(5..6, "_");
        assert_eq!(table.units(3..8), utf16("lo_wo"));
        assert_eq!(table.text(6..11), "world");
        assert!(table.units(4..4).is_empty());
    }

    #[test]
    fn test_surrogate_pairs_count_as_two_units() {
        let mut table = PieceTable::new("a😀b");
        assert_eq!(table.len(), 4);
        table.replace_characters(1..3, "");
        assert_eq!(table.string(), "ab");
    }

    #[test]
    fn test_iter_matches_units() {
        let mut table = PieceTable::new("abcdef");
        table.replace_characters(2..4, "ZZZ");
        let collected: Vec<u16> = table.iter().collect();
        assert_eq!(collected, table.units(0..table.len()));
        assert_eq!(table.to_string(), "abZZZef");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_edit_panics() {
        let mut table = PieceTable::new("abc");
        table.replace_characters(2..5, "x");
    }

    /// Property: any edit sequence yields the same contents as applying the
    /// edits to a plain vector of code units.
    #[test]
    fn edits_match_reference_model_quickcheck() {
        fn prop(initial: String, edits: Vec<(usize, usize, String)>) -> bool {
            let mut table = PieceTable::new(&initial);
            let mut model = utf16(&initial);

            for (a, b, text) in edits {
                let start = a % (model.len() + 1);
                let end = start + b % (model.len() - start + 1);
                let inserted = utf16(&text);

                table.replace_units(start..end, &inserted);
                model.splice(start..end, inserted);

                if table.units(0..table.len()) != model {
                    return false;
                }
            }
            table.original_units() == utf16(&initial).as_slice()
        }

        QuickCheck::new()
            .tests(500)
            .quickcheck(prop as fn(String, Vec<(usize, usize, String)>) -> bool);
    }
}
