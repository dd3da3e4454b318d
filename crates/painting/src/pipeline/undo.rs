//! Stroke recording and undo for the canvas

use std::collections::HashSet;
use tracing::debug;

use crate::grid::Grid;
use crate::painted::PaintedCells;

use super::Canvas;

/// A single cell change within a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeDiff {
    pub idx: usize,
    /// Color written back on undo
    pub before: u32,
    pub after: u32,
}

/// One committed gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub stroke_id: u64,
    /// Diffs in cell-touch order, at most one per cell
    pub diffs: Vec<StrokeDiff>,
}

/// Per-gesture diff recorder plus the undo stack
///
/// There is no redo: undo pops and discards.
#[derive(Debug, Default)]
pub struct StrokeHistory {
    /// Undo stack (most recent at end)
    undo_stack: Vec<Stroke>,
    /// Cells already recorded in the current gesture
    touched: HashSet<usize>,
    /// Diffs of the current gesture
    pending: Vec<StrokeDiff>,
    next_stroke_id: u64,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-gesture state for a new gesture
    pub fn begin_stroke(&mut self) {
        self.touched.clear();
        self.pending.clear();
    }

    /// Whether `idx` was already recorded in the current gesture
    #[inline]
    pub fn is_touched(&self, idx: usize) -> bool {
        self.touched.contains(&idx)
    }

    /// Record a cell change; only the first touch of a cell counts
    ///
    /// Returns true if a diff was appended.
    pub fn record_touch(&mut self, idx: usize, before: u32, after: u32) -> bool {
        if !self.touched.insert(idx) {
            return false;
        }
        self.pending.push(StrokeDiff { idx, before, after });
        true
    }

    /// Number of diffs recorded in the current gesture
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Commit the current gesture
    ///
    /// Pushes a stroke only if it recorded at least one diff, and returns
    /// its id. Per-gesture state is cleared either way.
    pub fn end_stroke(&mut self) -> Option<u64> {
        self.touched.clear();
        if self.pending.is_empty() {
            return None;
        }

        let stroke_id = self.next_stroke_id;
        self.next_stroke_id += 1;
        let diffs = std::mem::take(&mut self.pending);
        debug!("Saved undo entry for stroke {} ({} cells)", stroke_id, diffs.len());
        self.undo_stack.push(Stroke { stroke_id, diffs });
        Some(stroke_id)
    }

    /// Drop the current gesture without committing it
    ///
    /// Returns the discarded diffs so the caller can roll the grid back.
    pub fn discard_stroke(&mut self) -> Vec<StrokeDiff> {
        self.touched.clear();
        std::mem::take(&mut self.pending)
    }

    /// Pop the last stroke and write its `before` colors back
    ///
    /// Every restored cell is also removed from the painted set. Diffs are
    /// replayed in their recorded order.
    pub fn undo(&mut self, grid: &mut Grid, painted: &mut PaintedCells) -> Option<Stroke> {
        let Some(stroke) = self.undo_stack.pop() else {
            debug!("Undo: no entries available");
            return None;
        };

        debug!(
            "Undoing stroke {} ({} cells)",
            stroke.stroke_id,
            stroke.diffs.len()
        );
        for diff in &stroke.diffs {
            grid.set(diff.idx, diff.before);
            painted.remove(diff.idx);
        }
        Some(stroke)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Most recently committed stroke
    pub fn last_stroke(&self) -> Option<&Stroke> {
        self.undo_stack.last()
    }

    /// Drop all history, including any in-progress gesture
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.touched.clear();
        self.pending.clear();
    }
}

impl Canvas {
    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Get the number of undo levels available
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Undo the last stroke
    ///
    /// Returns true if an undo was performed. Ignored while a gesture is
    /// in progress.
    pub fn undo(&mut self) -> bool {
        if self.is_stroking() {
            debug!("Undo: gesture in progress, ignoring");
            return false;
        }
        let undone = self.history.undo(&mut self.grid, &mut self.painted).is_some();
        if undone {
            self.bump_revision();
        }
        undone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WHITE;

    const GREEN: u32 = 0xFF00FF00;

    #[test]
    fn test_record_touch_is_idempotent_per_gesture() {
        let mut history = StrokeHistory::new();
        history.begin_stroke();

        assert!(history.record_touch(3, WHITE, GREEN));
        assert!(!history.record_touch(3, GREEN, 0xFF0000FF));
        assert_eq!(history.pending_len(), 1);

        assert_eq!(history.end_stroke(), Some(0));
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_empty_stroke_not_recorded() {
        let mut history = StrokeHistory::new();
        history.begin_stroke();
        assert_eq!(history.end_stroke(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_touched_set_does_not_leak_across_gestures() {
        let mut history = StrokeHistory::new();
        history.begin_stroke();
        history.record_touch(1, WHITE, GREEN);
        history.end_stroke();

        history.begin_stroke();
        assert!(!history.is_touched(1));
        assert!(history.record_touch(1, GREEN, WHITE));
    }

    #[test]
    fn test_undo_restores_before_and_unmarks() {
        let mut grid = Grid::blank(4, 4);
        let mut painted = PaintedCells::new();
        let mut history = StrokeHistory::new();

        history.begin_stroke();
        grid.set(5, GREEN);
        painted.insert(5);
        history.record_touch(5, WHITE, GREEN);
        history.end_stroke();

        let stroke = history.undo(&mut grid, &mut painted).unwrap();
        assert_eq!(stroke.diffs, vec![StrokeDiff { idx: 5, before: WHITE, after: GREEN }]);
        assert_eq!(grid.get(5), Some(WHITE));
        assert!(!painted.contains(5));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut grid = Grid::blank(2, 2);
        let mut painted = PaintedCells::new();
        let mut history = StrokeHistory::new();
        assert!(history.undo(&mut grid, &mut painted).is_none());
        assert_eq!(grid, Grid::blank(2, 2));
    }

    #[test]
    fn test_undo_pops_most_recent_first() {
        let mut grid = Grid::blank(2, 1);
        let mut painted = PaintedCells::new();
        let mut history = StrokeHistory::new();

        for (idx, color) in [(0, GREEN), (1, 0xFF0000FF)] {
            history.begin_stroke();
            let before = grid.get(idx).unwrap();
            grid.set(idx, color);
            painted.insert(idx);
            history.record_touch(idx, before, color);
            history.end_stroke();
        }

        let last = history.undo(&mut grid, &mut painted).unwrap();
        assert_eq!(last.stroke_id, 1);
        assert_eq!(grid.get(1), Some(WHITE));
        assert_eq!(grid.get(0), Some(GREEN));
        assert!(painted.contains(0));
    }

    #[test]
    fn test_discard_returns_pending() {
        let mut history = StrokeHistory::new();
        history.begin_stroke();
        history.record_touch(2, WHITE, GREEN);
        history.record_touch(7, WHITE, GREEN);

        let discarded = history.discard_stroke();
        assert_eq!(discarded.len(), 2);
        assert_eq!(discarded[0].idx, 2);
        assert_eq!(history.pending_len(), 0);
        assert!(!history.is_touched(2));
        assert!(!history.can_undo());
    }
}
