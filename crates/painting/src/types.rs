use pixel_painter_ipc::{ConversionKind, ToolKind};
use serde::{Deserialize, Serialize};

/// Active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Tool {
    #[default]
    Paint = 0,
    Erase = 1,
    /// Single-cell color pick; never starts a gesture
    Eyedrop = 2,
}

/// Image-to-grid conversion algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ConversionMode {
    /// Smoothed direct downsample
    #[default]
    Pixelate = 0,
    /// Supersampled Sobel edges, black on white
    Outline = 1,
}

impl From<ToolKind> for Tool {
    fn from(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Paint => Tool::Paint,
            ToolKind::Erase => Tool::Erase,
            ToolKind::Eyedrop => Tool::Eyedrop,
        }
    }
}

impl From<ConversionKind> for ConversionMode {
    fn from(kind: ConversionKind) -> Self {
        match kind {
            ConversionKind::Pixel => ConversionMode::Pixelate,
            ConversionKind::Outline => ConversionMode::Outline,
        }
    }
}

/// Result of a pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStart {
    /// A paint or erase gesture is now active
    Started,
    /// The eyedropper picked this color; no gesture was started
    Picked(u32),
    /// Another pointer already owns the canvas, or the sample is off-grid
    Ignored,
}
