//! Memoization table for packrat parsing.

use std::ops::Range;

use tracing::trace;

use crate::{ParsingResult, RuleId};

/// Hit and attempt counters for memoization lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoizationStatistics {
    /// Lookups that found a memoized result.
    pub hits: usize,
    /// All lookups.
    pub attempts: usize,
}

impl MemoizationStatistics {
    /// Fraction of lookups answered from the table.
    pub fn hit_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.hits as f64 / self.attempts as f64
        }
    }
}

/// Memoized results for one buffer position, indexed by [`RuleId`].
#[derive(Debug, Clone, Default)]
struct MemoColumn {
    results: Vec<Option<ParsingResult>>,
}

impl MemoColumn {
    fn get(&self, rule: RuleId) -> Option<&ParsingResult> {
        self.results.get(rule.index()).and_then(Option::as_ref)
    }

    fn insert(&mut self, rule: RuleId, result: ParsingResult) {
        let index = rule.index();
        if self.results.len() <= index {
            self.results.resize(index + 1, None);
        }
        self.results[index] = Some(result);
    }

    /// Drops every result for which `keep` is false; returns how many were dropped.
    fn retain(&mut self, mut keep: impl FnMut(&ParsingResult) -> bool) -> usize {
        let mut removed = 0;
        for slot in &mut self.results {
            if slot.as_ref().is_some_and(|result| !keep(result)) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    fn clear(&mut self) -> usize {
        let removed = self.len();
        self.results.clear();
        removed
    }

    fn len(&self) -> usize {
        self.results.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Packrat memoization cache keyed by (position, rule).
///
/// The table holds one column per buffer position plus one for the end of
/// input; the column index *is* the position. After a text edit,
/// [`apply_edit`](Self::apply_edit) resizes and invalidates the table so every
/// surviving result is still correct for the edited text.
#[derive(Debug, Clone)]
pub struct MemoizationTable {
    columns: Vec<MemoColumn>,
    statistics: MemoizationStatistics,
}

impl MemoizationTable {
    /// Creates an empty table for a buffer of `length` code units.
    pub fn new(length: usize) -> Self {
        Self {
            columns: vec![MemoColumn::default(); length + 1],
            statistics: MemoizationStatistics::default(),
        }
    }

    /// Number of columns (buffer length + 1).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of memoized results.
    pub fn entry_count(&self) -> usize {
        self.columns.iter().map(MemoColumn::len).sum()
    }

    /// Returns the memoized result of `rule` at `index`, counting the lookup.
    pub fn memoized_result(&mut self, rule: RuleId, index: usize) -> Option<ParsingResult> {
        self.statistics.attempts += 1;
        let result = self.columns.get(index)?.get(rule).cloned();
        if result.is_some() {
            self.statistics.hits += 1;
        }
        result
    }

    /// Stores `result` for `rule` at `index`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the result examined no input or examined
    /// less than it consumed. A zero-examined result would be replayed for
    /// any text at this position.
    pub fn memoize_result(&mut self, result: ParsingResult, rule: RuleId, index: usize) {
        debug_assert!(
            result.examined_length > 0,
            "rule {rule} examined no input at {index} and cannot be memoized"
        );
        debug_assert!(
            result.examined_length >= result.length,
            "rule {rule} at {index} consumed {} units but examined {}",
            result.length,
            result.examined_length
        );
        if let Some(column) = self.columns.get_mut(index) {
            column.insert(rule, result);
        }
    }

    /// Updates the table for an edit replacing `range` with `replacement_length` units.
    ///
    /// 1. Columns are inserted or removed at `range.start` so the table
    ///    matches the new text length; columns right of the edit shift with
    ///    the text they describe.
    /// 2. Columns inside the replaced span are cleared.
    /// 3. Every result left of the edit whose examined span reaches the edit
    ///    start is dropped. A result that examined exactly up to the edit is
    ///    dropped too.
    ///
    /// # Panics
    ///
    /// Panics if `range` is outside the buffer the table describes.
    pub fn apply_edit(&mut self, range: Range<usize>, replacement_length: usize) {
        assert!(
            range.start <= range.end && range.end < self.columns.len(),
            "edit {:?} out of bounds for memoization table with {} columns",
            range,
            self.columns.len()
        );

        let removed_length = range.len();
        if replacement_length < removed_length {
            let excess = removed_length - replacement_length;
            self.columns.drain(range.start..range.start + excess);
        } else if replacement_length > removed_length {
            let missing = replacement_length - removed_length;
            self.columns.splice(
                range.start..range.start,
                std::iter::repeat_with(MemoColumn::default).take(missing),
            );
        }

        let mut cleared = 0;
        for column in &mut self.columns[range.start..range.start + replacement_length] {
            cleared += column.clear();
        }

        let mut invalidated = 0;
        for (index, column) in self.columns[..range.start].iter_mut().enumerate() {
            let distance = range.start - index;
            invalidated += column.retain(|result| result.examined_length < distance);
        }

        trace!(
            start = range.start,
            removed = removed_length,
            inserted = replacement_length,
            cleared,
            invalidated,
            "applied edit to memoization table"
        );
    }

    /// Drops every memoized result, keeping the column count.
    pub fn remove_all(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
    }

    /// Lookup counters accumulated since creation or the last reset.
    pub fn statistics(&self) -> MemoizationStatistics {
        self.statistics
    }

    /// Resets the lookup counters.
    pub fn reset_statistics(&mut self) {
        self.statistics = MemoizationStatistics::default();
    }
}
