//! Image-to-grid converters
//!
//! Both converters are pure: they take encoded image bytes and a target
//! width and produce a complete color buffer, or fail without side effects.
//! The canvas decides whether a finished conversion is still wanted (see
//! [`ConversionJob`] and the canvas ticket sequencing).

mod outline;
mod pixelate;

use std::sync::Arc;

use image::RgbaImage;
use pixel_painter_config::{MAX_GRID_DIM, MIN_GRID_DIM};
use tracing::{debug, warn};

use crate::error::PaintingError;
use crate::grid::Grid;
use crate::types::ConversionMode;

pub use outline::{luminance, max_pool_edges, outline, sobel_magnitude};
pub use pixelate::pixelate;

/// A converted grid, not yet installed on a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub width: u32,
    pub height: u32,
    pub colors: Vec<u32>,
}

impl Conversion {
    pub fn into_grid(self) -> Result<Grid, PaintingError> {
        Grid::from_colors(self.width, self.height, self.colors)
    }
}

/// Grid dimensions for a source image at the requested width
///
/// The width is clamped to `[MIN_GRID_DIM, MAX_GRID_DIM]`, the height follows
/// the source aspect ratio (rounded) and is clamped to the same range.
pub fn target_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
) -> Result<(u32, u32), PaintingError> {
    if src_width == 0 || src_height == 0 {
        return Err(PaintingError::InvalidGeometry {
            width: src_width,
            height: src_height,
        });
    }

    let width = target_width.clamp(MIN_GRID_DIM, MAX_GRID_DIM);
    let height = (f64::from(width) * f64::from(src_height) / f64::from(src_width))
        .round()
        .clamp(f64::from(MIN_GRID_DIM), f64::from(MAX_GRID_DIM)) as u32;
    Ok((width, height))
}

/// Decode uploaded bytes, sniffing the format from the content
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, PaintingError> {
    let img = image::load_from_memory(bytes).map_err(|e| {
        warn!("Rejected image upload ({} bytes): {}", bytes.len(), e);
        PaintingError::Decode(e.to_string())
    })?;
    Ok(img.to_rgba8())
}

/// Decode and convert in one step
pub fn convert(
    bytes: &[u8],
    mode: ConversionMode,
    target_width: u32,
) -> Result<Conversion, PaintingError> {
    let img = decode(bytes)?;
    convert_image(&img, mode, target_width)
}

/// Convert an already decoded image
pub fn convert_image(
    img: &RgbaImage,
    mode: ConversionMode,
    target_width: u32,
) -> Result<Conversion, PaintingError> {
    let (width, height) = target_dimensions(img.width(), img.height(), target_width)?;
    debug!(
        "Converting {}x{} image to {}x{} grid ({:?})",
        img.width(),
        img.height(),
        width,
        height,
        mode
    );

    let colors = match mode {
        ConversionMode::Pixelate => pixelate(img, width, height),
        ConversionMode::Outline => outline(img, width, height),
    };
    Ok(Conversion {
        width,
        height,
        colors,
    })
}

/// A conversion request issued by the canvas
///
/// Carries everything the converter needs, so it can run on any thread
/// while the canvas keeps handling input.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Sequence number; only the latest issued ticket is applied
    pub ticket: u64,
    pub source: Arc<[u8]>,
    pub mode: ConversionMode,
    pub target_width: u32,
}

/// A finished conversion, ready for `Canvas::apply_conversion`
#[derive(Debug)]
pub struct ConversionOutcome {
    pub ticket: u64,
    pub source: Arc<[u8]>,
    pub result: Result<Conversion, PaintingError>,
}

impl ConversionJob {
    /// Run the conversion on the calling thread
    pub fn run_blocking(self) -> ConversionOutcome {
        let result = convert(&self.source, self.mode, self.target_width);
        ConversionOutcome {
            ticket: self.ticket,
            source: self.source,
            result,
        }
    }

    /// Run the conversion on the blocking thread pool
    pub async fn run(self) -> ConversionOutcome {
        let ticket = self.ticket;
        let source = Arc::clone(&self.source);

        match tokio::task::spawn_blocking(move || self.run_blocking()).await {
            Ok(outcome) => outcome,
            Err(e) => ConversionOutcome {
                ticket,
                source,
                result: Err(PaintingError::Decode(format!("conversion task failed: {e}"))),
            },
        }
    }
}
