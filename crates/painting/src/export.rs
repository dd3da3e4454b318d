//! Flatten the grid to an export raster and encode it
//!
//! When the user has painted anything, only painted cells are exported and
//! everything else is left white, so an image-seeded canvas exports just
//! the user's strokes.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::color::{Rgba, blend_over, unpack};
use crate::composite::scaled_size;
use crate::constants::WHITE;
use crate::error::PaintingError;
use crate::grid::Grid;
use crate::painted::PaintedCells;

/// Render `grid` at `scale` pixels per cell onto opaque white
///
/// With a non-empty `painted` set only those cells are drawn. An empty set
/// behaves like `None`.
pub fn flatten(
    grid: &Grid,
    painted: Option<&PaintedCells>,
    scale: u32,
) -> Result<RgbaImage, PaintingError> {
    let (img_w, img_h) = scaled_size(grid, scale)?;
    let painted = painted.filter(|cells| !cells.is_empty());

    let white = unpack(WHITE);
    let cells: Vec<Rgba> = grid
        .colors()
        .iter()
        .enumerate()
        .map(|(idx, &color)| match painted {
            Some(cells) if !cells.contains(idx) => white,
            _ => blend_over(white, unpack(color), 1.0),
        })
        .collect();

    let mut pixels: Vec<Rgba> = Vec::with_capacity((img_w as usize) * (img_h as usize));
    for py in 0..img_h {
        let row = (py / scale) as usize * grid.width() as usize;
        for px in 0..img_w {
            pixels.push(cells[row + (px / scale) as usize]);
        }
    }

    let bytes: Vec<u8> = bytemuck::cast_slice(&pixels).to_vec();
    RgbaImage::from_raw(img_w, img_h, bytes).ok_or(PaintingError::InvalidGeometry {
        width: img_w,
        height: img_h,
    })
}

/// Encode a raster as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, PaintingError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PaintingError::Encode(e.to_string()))?;
    debug!(
        "Encoded {}x{} export ({} bytes)",
        img.width(),
        img.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Flatten and encode on the blocking thread pool
pub async fn export_png(
    grid: Grid,
    painted: Option<PaintedCells>,
    scale: u32,
) -> Result<Vec<u8>, PaintingError> {
    tokio::task::spawn_blocking(move || {
        let img = flatten(&grid, painted.as_ref(), scale)?;
        encode_png(&img)
    })
    .await
    .map_err(|e| PaintingError::Encode(format!("export task failed: {e}")))?
}

/// Download name for an export taken at `timestamp_ms`
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("pixel-painter-{timestamp_ms}.png")
}
