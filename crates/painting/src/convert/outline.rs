//! Edge-detection conversion
//!
//! The source is rendered at `OUTLINE_SCALE` times the grid resolution,
//! reduced to luminance, run through a 3x3 Sobel operator, and max-pooled
//! back down so a single strong edge pixel marks its whole cell.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use pixel_painter_config::{OUTLINE_SCALE, OUTLINE_THRESHOLD};

use crate::constants::{BLACK, WHITE};

/// Convert `img` to a black-on-white edge map of `width × height` cells
pub fn outline(img: &RgbaImage, width: u32, height: u32) -> Vec<u32> {
    let hi_w = width * OUTLINE_SCALE;
    let hi_h = height * OUTLINE_SCALE;
    let upsampled = imageops::resize(img, hi_w, hi_h, FilterType::CatmullRom);

    let luma = luminance(&upsampled);
    let magnitude = sobel_magnitude(&luma, hi_w, hi_h);
    max_pool_edges(&magnitude, width, height, OUTLINE_SCALE, OUTLINE_THRESHOLD)
}

/// BT.601 luma of every pixel, row-major
pub fn luminance(img: &RgbaImage) -> Vec<f32> {
    img.pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
        })
        .collect()
}

/// Sobel gradient magnitude `sqrt(gx² + gy²)` of a luma field
///
/// Border pixels have no full 3x3 neighbourhood and stay at zero.
pub fn sobel_magnitude(luma: &[f32], width: u32, height: u32) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    let mut magnitude = vec![0.0; w * h];
    if w < 3 || h < 3 || luma.len() < w * h {
        return magnitude;
    }

    let at = |x: usize, y: usize| luma[y * w + x];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
            magnitude[y * w + x] = (gx * gx + gy * gy).sqrt();
        }
    }
    magnitude
}

/// Reduce a `width*scale × height*scale` magnitude field to cells
///
/// A cell is black when the maximum magnitude in its `scale × scale` block
/// exceeds `threshold`, white otherwise.
pub fn max_pool_edges(
    magnitude: &[f32],
    width: u32,
    height: u32,
    scale: u32,
    threshold: f32,
) -> Vec<u32> {
    let (w, h, s) = (width as usize, height as usize, scale as usize);
    let hi_w = w * s;

    let mut cells = Vec::with_capacity(w * h);
    for cy in 0..h {
        for cx in 0..w {
            let mut peak = 0.0f32;
            for dy in 0..s {
                let row = (cy * s + dy) * hi_w + cx * s;
                if let Some(block_row) = magnitude.get(row..row + s) {
                    peak = block_row.iter().copied().fold(peak, f32::max);
                }
            }
            cells.push(if peak > threshold { BLACK } else { WHITE });
        }
    }
    cells
}
