//! Brush engine for cell-block painting
//!
//! A brush covers a square block of cells anchored at the pointer cell.
//! Each sample of a gesture applies the active tool to every cell of the
//! block that has not been touched yet in that gesture.

use pixel_painter_config::clamp_brush_size;
use tracing::debug;

use crate::constants::{PALETTE, WHITE};
use crate::grid::Grid;
use crate::painted::PaintedCells;
use crate::pipeline::StrokeHistory;
use crate::types::Tool;

/// Brush configuration read on every gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub tool: Tool,
    /// Edge length of the affected block in cells
    pub size: u32,
    /// Packed color written by the paint tool
    pub color: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Paint,
            size: 1,
            color: PALETTE[0],
        }
    }
}

impl BrushSettings {
    /// Set the brush size, clamped to the supported range
    pub fn set_size(&mut self, size: u32) {
        self.size = clamp_brush_size(size);
    }
}

/// Cells covered by a brush of `size` anchored at `(cx, cy)`, clipped to the grid
///
/// Odd sizes are centered on the anchor. Even sizes put the extra row and
/// column on the positive side, so the anchor cell is always covered.
pub fn footprint(
    cx: i32,
    cy: i32,
    size: u32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let size = size.max(1) as i32;
    let lo = -((size - 1) / 2);
    let hi = lo + size;

    let x_range = (cx + lo).max(0)..(cx + hi).min(width as i32);
    let y_range = (cy + lo).max(0)..(cy + hi).min(height as i32);

    y_range.flat_map(move |y| x_range.clone().map(move |x| (x as u32, y as u32)))
}

/// Mutable view of everything a dab may touch
pub struct BrushTarget<'a> {
    pub grid: &'a mut Grid,
    pub painted: &'a mut PaintedCells,
    pub history: &'a mut StrokeHistory,
    /// Colors restored by the eraser; white when absent
    pub reference: Option<&'a [u32]>,
}

/// What a single dab changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DabOutput {
    /// Cells whose diff was recorded by this dab, in touch order
    pub changed: Vec<usize>,
    /// Cells that became painted and were not painted before
    pub newly_painted: Vec<usize>,
    /// Cells removed from the painted set by the eraser
    pub erased: Vec<usize>,
}

impl DabOutput {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Apply the brush once at cell `(cx, cy)`
///
/// Eyedrop is not a block operation and produces no changes here.
pub fn apply_dab(
    target: &mut BrushTarget<'_>,
    settings: &BrushSettings,
    cx: i32,
    cy: i32,
) -> DabOutput {
    let mut output = DabOutput::default();
    if settings.tool == Tool::Eyedrop {
        return output;
    }

    let (width, height) = (target.grid.width(), target.grid.height());
    for (x, y) in footprint(cx, cy, settings.size, width, height) {
        let idx = (y as usize) * (width as usize) + (x as usize);
        match settings.tool {
            Tool::Paint => paint_cell(target, idx, settings.color, &mut output),
            Tool::Erase => erase_cell(target, idx, &mut output),
            Tool::Eyedrop => {}
        }
    }

    if !output.is_empty() {
        debug!(
            "apply_dab: {:?} at ({}, {}) size={} changed {} cells",
            settings.tool,
            cx,
            cy,
            settings.size,
            output.changed.len()
        );
    }
    output
}

fn paint_cell(target: &mut BrushTarget<'_>, idx: usize, color: u32, output: &mut DabOutput) {
    if target.history.is_touched(idx) {
        return;
    }
    let Some(before) = target.grid.get(idx) else {
        return;
    };
    // Repainting an already painted cell with its own color is a no-op
    if before == color && target.painted.contains(idx) {
        return;
    }

    target.grid.set(idx, color);
    if target.painted.insert(idx) {
        output.newly_painted.push(idx);
    }
    target.history.record_touch(idx, before, color);
    output.changed.push(idx);
}

fn erase_cell(target: &mut BrushTarget<'_>, idx: usize, output: &mut DabOutput) {
    if target.history.is_touched(idx) || !target.painted.contains(idx) {
        return;
    }
    let Some(before) = target.grid.get(idx) else {
        return;
    };
    let restored = target
        .reference
        .and_then(|reference| reference.get(idx).copied())
        .unwrap_or(WHITE);

    target.grid.set(idx, restored);
    target.painted.remove(idx);
    // Both sides hold the pre-erase color, so undo brings the paint back
    target.history.record_touch(idx, before, before);
    output.changed.push(idx);
    output.erased.push(idx);
}
