//! Gesture handling for the canvas
//!
//! One pointer at a time may own the canvas. A gesture runs from
//! pointer-down to pointer-up (committed as one undo stroke) or
//! pointer-cancel (rolled back as if it never happened).

use tracing::debug;

use crate::brush::{self, BrushTarget, DabOutput};
use crate::types::{GestureStart, Tool};

use super::Canvas;

/// Pointer ownership of the canvas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Active(ActiveGesture),
}

/// Bookkeeping for the gesture in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGesture {
    pub pointer_id: u32,
    /// Tool captured at pointer-down
    pub tool: Tool,
    /// Cells this gesture added to the painted set
    newly_painted: Vec<usize>,
    /// Cells this gesture removed from the painted set
    erased: Vec<usize>,
}

impl ActiveGesture {
    fn absorb(&mut self, output: DabOutput) {
        self.newly_painted.extend(output.newly_painted);
        self.erased.extend(output.erased);
    }
}

impl Canvas {
    /// Pointer-down at cell `(x, y)`
    ///
    /// With the eyedropper the cell color becomes the selected color, the
    /// tool switches back to paint and no gesture starts.
    pub fn begin_gesture(&mut self, pointer_id: u32, x: i32, y: i32) -> GestureStart {
        if let GestureState::Active(active) = &self.gesture {
            debug!(
                "begin_gesture: pointer {} ignored, pointer {} is active",
                pointer_id, active.pointer_id
            );
            return GestureStart::Ignored;
        }
        let Some(color) = self.grid.get_xy(x, y) else {
            return GestureStart::Ignored;
        };

        if self.brush.tool == Tool::Eyedrop {
            debug!("eyedrop at ({}, {}): {:#010x}", x, y, color);
            self.brush.color = color;
            self.brush.tool = Tool::Paint;
            return GestureStart::Picked(color);
        }

        self.history.begin_stroke();
        self.gesture = GestureState::Active(ActiveGesture {
            pointer_id,
            tool: self.brush.tool,
            newly_painted: Vec::new(),
            erased: Vec::new(),
        });
        self.dab(x, y);
        GestureStart::Started
    }

    /// Pointer-move to cell `(x, y)`
    ///
    /// Returns true if any cell changed. Samples from a pointer that does
    /// not own the canvas are ignored.
    pub fn update_gesture(&mut self, pointer_id: u32, x: i32, y: i32) -> bool {
        if self.active_pointer() != Some(pointer_id) {
            return false;
        }
        if self.grid.index_of(x, y).is_none() {
            return false;
        }
        self.dab(x, y)
    }

    /// Pointer-up: commit the gesture as one undo stroke
    ///
    /// Returns true if a stroke was pushed (gestures that changed nothing
    /// are not recorded).
    pub fn end_gesture(&mut self, pointer_id: u32) -> bool {
        if self.active_pointer() != Some(pointer_id) {
            return false;
        }
        self.gesture = GestureState::Idle;
        self.history.end_stroke().is_some()
    }

    /// Pointer-cancel: discard the gesture and restore every cell it touched
    ///
    /// Returns true if a gesture was cancelled.
    pub fn cancel_gesture(&mut self, pointer_id: u32) -> bool {
        if self.active_pointer() != Some(pointer_id) {
            return false;
        }
        self.abort_gesture();
        true
    }

    /// Check if a gesture is in progress
    pub fn is_stroking(&self) -> bool {
        matches!(self.gesture, GestureState::Active(_))
    }

    /// Pointer owning the canvas, if any
    pub fn active_pointer(&self) -> Option<u32> {
        match &self.gesture {
            GestureState::Active(active) => Some(active.pointer_id),
            GestureState::Idle => None,
        }
    }

    /// Roll back and drop the in-progress gesture, if any
    pub(crate) fn abort_gesture(&mut self) {
        let GestureState::Active(active) = std::mem::take(&mut self.gesture) else {
            return;
        };

        let discarded = self.history.discard_stroke();
        for diff in discarded.iter().rev() {
            self.grid.set(diff.idx, diff.before);
        }
        for idx in active.newly_painted {
            self.painted.remove(idx);
        }
        for idx in active.erased {
            self.painted.insert(idx);
        }

        debug!(
            "Cancelled gesture for pointer {} ({} cells restored)",
            active.pointer_id,
            discarded.len()
        );
        if !discarded.is_empty() {
            self.bump_revision();
        }
    }

    fn dab(&mut self, x: i32, y: i32) -> bool {
        let GestureState::Active(active) = &self.gesture else {
            return false;
        };
        let mut settings = self.brush;
        settings.tool = active.tool;

        let mut target = BrushTarget {
            grid: &mut self.grid,
            painted: &mut self.painted,
            history: &mut self.history,
            reference: self.reference.as_deref(),
        };
        let output = brush::apply_dab(&mut target, &settings, x, y);
        let changed = !output.is_empty();

        if let GestureState::Active(active) = &mut self.gesture {
            active.absorb(output);
        }
        if changed {
            self.bump_revision();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WHITE;
    use crate::pipeline::StrokeDiff;
    use pixel_painter_config::EditorConfig;

    const GREEN: u32 = 0xFF00FF00;
    const RED: u32 = 0xFFFF0000;

    fn canvas(width: u32) -> Canvas {
        Canvas::new(&EditorConfig {
            grid_width: width,
            ..Default::default()
        })
    }

    #[test]
    fn test_paint_then_undo() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);

        assert_eq!(canvas.begin_gesture(1, 5, 0), GestureStart::Started);
        assert!(canvas.is_stroking());
        assert!(canvas.end_gesture(1));
        assert!(!canvas.is_stroking());

        assert_eq!(canvas.grid().get(5), Some(GREEN));
        assert!(canvas.painted().contains(5));

        assert!(canvas.undo());
        assert_eq!(canvas.grid().get(5), Some(WHITE));
        assert!(!canvas.painted().contains(5));
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut canvas = canvas(8);
        assert_eq!(canvas.begin_gesture(1, 0, 0), GestureStart::Started);
        assert_eq!(canvas.begin_gesture(2, 3, 3), GestureStart::Ignored);

        assert!(!canvas.update_gesture(2, 4, 4));
        assert!(!canvas.end_gesture(2));
        assert!(canvas.is_stroking());
        assert_eq!(canvas.active_pointer(), Some(1));

        assert!(canvas.end_gesture(1));
        assert_eq!(canvas.grid().get_xy(3, 3), Some(WHITE));
        assert_eq!(canvas.grid().get_xy(4, 4), Some(WHITE));
    }

    #[test]
    fn test_drag_records_one_stroke() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(RED);

        canvas.begin_gesture(1, 0, 0);
        canvas.update_gesture(1, 1, 0);
        canvas.update_gesture(1, 0, 0);
        canvas.update_gesture(1, 2, 0);
        canvas.end_gesture(1);

        assert_eq!(canvas.undo_count(), 1);
        assert_eq!(canvas.painted().sorted(), vec![0, 1, 2]);

        canvas.undo();
        assert!(canvas.grid().colors().iter().all(|&c| c == WHITE));
        assert!(canvas.painted().is_empty());
    }

    #[test]
    fn test_repaint_within_gesture_keeps_first_before() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 0, 0);
        canvas.end_gesture(1);

        canvas.set_selected_color(RED);
        canvas.begin_gesture(1, 0, 0);
        canvas.update_gesture(1, 0, 0);
        canvas.end_gesture(1);
        assert_eq!(canvas.undo_count(), 2);

        canvas.undo();
        assert_eq!(canvas.grid().get(0), Some(GREEN));
    }

    #[test]
    fn test_same_color_repaint_not_recorded() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 2, 2);
        canvas.end_gesture(1);
        let revision = canvas.revision();

        canvas.begin_gesture(1, 2, 2);
        assert!(!canvas.end_gesture(1));
        assert_eq!(canvas.undo_count(), 1);
        assert_eq!(canvas.revision(), revision);
    }

    #[test]
    fn test_cancel_restores_cells() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 0, 0);
        canvas.end_gesture(1);

        canvas.set_selected_color(RED);
        canvas.set_brush_size(2);
        canvas.begin_gesture(7, 0, 0);
        canvas.update_gesture(7, 3, 3);
        assert!(canvas.cancel_gesture(7));

        assert!(!canvas.is_stroking());
        assert_eq!(canvas.undo_count(), 1);
        assert_eq!(canvas.grid().get(0), Some(GREEN));
        assert_eq!(canvas.painted().sorted(), vec![0]);
        assert_eq!(canvas.grid().get_xy(3, 3), Some(WHITE));
    }

    #[test]
    fn test_cancel_restores_erased_cells() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 1, 1);
        canvas.end_gesture(1);

        canvas.set_tool(Tool::Erase);
        canvas.begin_gesture(1, 1, 1);
        assert_eq!(canvas.grid().get_xy(1, 1), Some(WHITE));
        canvas.cancel_gesture(1);

        assert_eq!(canvas.grid().get_xy(1, 1), Some(GREEN));
        assert!(canvas.painted().contains(9));
    }

    #[test]
    fn test_eyedrop_picks_without_side_effects() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 4, 4);
        canvas.end_gesture(1);

        canvas.set_selected_color(RED);
        canvas.set_tool(Tool::Eyedrop);
        let revision = canvas.revision();

        assert_eq!(canvas.begin_gesture(2, 4, 4), GestureStart::Picked(GREEN));
        assert!(!canvas.is_stroking());
        assert_eq!(canvas.selected_color(), GREEN);
        assert_eq!(canvas.tool(), Tool::Paint);
        assert_eq!(canvas.undo_count(), 1);
        assert_eq!(canvas.revision(), revision);
    }

    #[test]
    fn test_off_grid_pointer_down_ignored() {
        let mut canvas = canvas(8);
        assert_eq!(canvas.begin_gesture(1, -1, 0), GestureStart::Ignored);
        assert_eq!(canvas.begin_gesture(1, 8, 8), GestureStart::Ignored);
        assert!(!canvas.is_stroking());
    }

    #[test]
    fn test_erase_undo_brings_back_paint_unmarked() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 0, 0);
        canvas.end_gesture(1);

        canvas.set_tool(Tool::Erase);
        canvas.begin_gesture(1, 0, 0);
        canvas.end_gesture(1);
        assert_eq!(canvas.grid().get(0), Some(WHITE));

        let stroke = canvas.history.last_stroke().cloned().unwrap();
        assert_eq!(
            stroke.diffs,
            vec![StrokeDiff {
                idx: 0,
                before: GREEN,
                after: GREEN
            }]
        );

        canvas.undo();
        assert_eq!(canvas.grid().get(0), Some(GREEN));
        assert!(!canvas.painted().contains(0));
    }

    #[test]
    fn test_tool_change_mid_gesture_applies_next_gesture() {
        let mut canvas = canvas(8);
        canvas.set_selected_color(GREEN);
        canvas.begin_gesture(1, 0, 0);
        canvas.set_tool(Tool::Erase);
        canvas.update_gesture(1, 1, 0);
        canvas.end_gesture(1);

        assert_eq!(canvas.painted().sorted(), vec![0, 1]);
    }

    #[test]
    fn test_undo_ignored_during_gesture() {
        let mut canvas = canvas(8);
        canvas.begin_gesture(1, 0, 0);
        canvas.end_gesture(1);

        canvas.begin_gesture(1, 1, 0);
        assert!(!canvas.undo());
        canvas.end_gesture(1);
        assert_eq!(canvas.undo_count(), 2);
    }
}
