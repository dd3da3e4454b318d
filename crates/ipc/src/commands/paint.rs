//! Paint command types for the grid editor.

use serde::{Deserialize, Serialize};

/// Tool selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Paint,
    Erase,
    Eyedrop,
}

/// How an uploaded image is turned into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// Direct smoothed downsampling
    #[default]
    Pixel,
    /// Black edges on white
    Outline,
}

/// Pointer sample in grid cell coordinates.
///
/// Coordinates may fall outside the grid; the engine ignores those samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pointer_id: u32,
    pub x: i32,
    pub y: i32,
}
