//! Main IPC message enums for communication between the editor engine and UI.

use serde::{Deserialize, Serialize};

use crate::commands::{ConversionKind, PointerSample, ToolKind};

/// Messages from the editor engine to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorToUi {
    /// The grid was replaced wholesale (new image, resize, mode change)
    GridReplaced {
        width: u32,
        height: u32,
        has_reference: bool,
    },

    /// Cell colors changed; the UI should redraw
    GridChanged { revision: u64 },

    /// Undo stack depth changed
    UndoAvailability { can_undo: bool, depth: usize },

    /// Eyedropper picked a color (`#rrggbb`)
    ColorPicked { color: String },

    /// An image could not be converted; the previous canvas is kept
    ConversionFailed { message: String },

    /// Error notification
    Error { code: String, message: String },
}

/// Messages from the UI to the editor engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEditor {
    /// Pointer pressed on the canvas
    BeginGesture(PointerSample),

    /// Pointer moved while pressed
    UpdateGesture(PointerSample),

    /// Pointer released
    EndGesture { pointer_id: u32 },

    /// Pointer capture lost; the gesture is discarded
    CancelGesture { pointer_id: u32 },

    /// Change the active tool
    SetTool(ToolKind),

    /// Change the brush edge length in cells
    SetBrushSize { size: u32 },

    /// Change the selected color (`#rgb` or `#rrggbb`)
    SetSelectedColor { color: String },

    /// Undo the last stroke
    Undo,

    /// Change how uploaded images are converted
    SetConversionMode(ConversionKind),

    /// Change the grid resolution
    Resize { width: u32 },

    /// Convert the uploaded image again with the current settings
    Repixelate,

    /// Drop the uploaded image and start from a blank canvas
    ClearImage,
}
