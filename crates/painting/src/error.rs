//! Error types for the grid editor engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintingError {
    /// Uploaded bytes are not a readable image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Raster could not be encoded to image bytes
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Non-positive width, height or scale
    #[error("Invalid geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}
