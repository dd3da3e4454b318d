//! Display compositing
//!
//! Once the user starts painting over a loaded image, unpainted cells fade
//! to `REFERENCE_FADE_ALPHA` so the painted cells stand out. Blank canvases
//! and untouched images are shown at full opacity.

use image::RgbaImage;
use pixel_painter_config::{GRID_LINE_ALPHA, GRID_LINE_MIN_CELL_SIZE, REFERENCE_FADE_ALPHA};

use crate::color::{Rgba, blend_over, unpack};
use crate::constants::{BLACK, WHITE};
use crate::error::PaintingError;
use crate::grid::Grid;
use crate::painted::PaintedCells;

/// Display color and opacity of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeCell {
    pub color: u32,
    pub alpha: f32,
}

/// Per-cell display colors, row-major
pub fn composite_cells(
    grid: &Grid,
    reference: Option<&[u32]>,
    painted: &PaintedCells,
) -> Vec<CompositeCell> {
    let fade = reference.is_some() && !painted.is_empty();

    grid.colors()
        .iter()
        .enumerate()
        .map(|(idx, &color)| {
            if !fade || painted.contains(idx) {
                return CompositeCell { color, alpha: 1.0 };
            }
            let color = reference
                .and_then(|reference| reference.get(idx).copied())
                .unwrap_or(color);
            CompositeCell {
                color,
                alpha: REFERENCE_FADE_ALPHA,
            }
        })
        .collect()
}

/// Rasterize the composite onto white at `cell_size` pixels per cell
///
/// Grid lines are 1 px, black at `GRID_LINE_ALPHA`, on every cell boundary
/// and only drawn when `show_grid` is set and cells are at least
/// `GRID_LINE_MIN_CELL_SIZE` pixels.
pub fn render_display(
    grid: &Grid,
    reference: Option<&[u32]>,
    painted: &PaintedCells,
    cell_size: u32,
    show_grid: bool,
) -> Result<RgbaImage, PaintingError> {
    let (img_w, img_h) = scaled_size(grid, cell_size)?;
    let cells = composite_cells(grid, reference, painted);
    let white = unpack(WHITE);
    let line = unpack(BLACK);
    let grid_lines = show_grid && cell_size >= GRID_LINE_MIN_CELL_SIZE;

    let mut pixels: Vec<Rgba> = Vec::with_capacity((img_w as usize) * (img_h as usize));
    for py in 0..img_h {
        let row = (py / cell_size) as usize * grid.width() as usize;
        for px in 0..img_w {
            let cell = cells[row + (px / cell_size) as usize];
            let mut pixel = blend_over(white, unpack(cell.color), cell.alpha);

            if grid_lines
                && (px % cell_size == 0 || py % cell_size == 0 || px == img_w - 1 || py == img_h - 1)
            {
                pixel = blend_over(pixel, line, GRID_LINE_ALPHA);
            }
            pixels.push(pixel);
        }
    }

    let bytes: Vec<u8> = bytemuck::cast_slice(&pixels).to_vec();
    RgbaImage::from_raw(img_w, img_h, bytes).ok_or(PaintingError::InvalidGeometry {
        width: img_w,
        height: img_h,
    })
}

/// Raster size of `grid` at `scale` pixels per cell
pub(crate) fn scaled_size(grid: &Grid, scale: u32) -> Result<(u32, u32), PaintingError> {
    let invalid = PaintingError::InvalidGeometry {
        width: grid.width(),
        height: grid.height(),
    };
    if scale == 0 || grid.cell_count() == 0 {
        return Err(invalid);
    }
    match (grid.width().checked_mul(scale), grid.height().checked_mul(scale)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(invalid),
    }
}
