//! Canvas editing session
//!
//! This module provides the canvas that ties together:
//! - The pixel grid and the reference snapshot of a loaded image
//! - The painted-cell set (cells drawn by the user over the reference)
//! - Stroke recording and undo
//! - The gesture state machine driving the brush engine
//! - Image conversion requests and their sequencing
//!
//! Grid, reference, painted set and undo history form one consistency
//! group: whenever the grid is replaced wholesale all four are reset together.

mod commands;
mod stroke;
mod surface_ops;
mod undo;

use std::sync::Arc;

use pixel_painter_config::{EditorConfig, clamp_grid_dim};
use tracing::debug;

use crate::brush::BrushSettings;
use crate::composite::{self, CompositeCell};
use crate::error::PaintingError;
use crate::export;
use crate::grid::Grid;
use crate::painted::PaintedCells;
use crate::types::{ConversionMode, Tool};

pub use commands::Dispatch;
pub use stroke::{ActiveGesture, GestureState};
pub use undo::{Stroke, StrokeDiff, StrokeHistory};

/// Pixel canvas with undo, brush state and image conversion sequencing
pub struct Canvas {
    /// Current cell colors
    pub(crate) grid: Grid,
    /// Colors of the loaded image before any edits (None for blank canvases)
    pub(crate) reference: Option<Vec<u32>>,
    /// Cells explicitly painted by the user
    pub(crate) painted: PaintedCells,
    /// Per-gesture recorder and undo stack
    pub(crate) history: StrokeHistory,
    /// Idle or bound to one pointer
    pub(crate) gesture: GestureState,
    /// Tool, size and color
    pub(crate) brush: BrushSettings,
    /// Converter used for uploaded images
    pub(crate) mode: ConversionMode,
    /// Requested grid width
    pub(crate) target_width: u32,
    /// Bytes of the image the grid was converted from
    pub(crate) source: Option<Arc<[u8]>>,
    /// Most recently uploaded image whose conversion has not been installed
    pub(crate) pending_source: Option<Arc<[u8]>>,
    /// Most recently issued conversion ticket
    pub(crate) latest_ticket: u64,
    /// Bumped on every visible change
    pub(crate) revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Canvas {
    /// Create a blank square canvas from the editor configuration
    pub fn new(config: &EditorConfig) -> Self {
        let width = clamp_grid_dim(config.grid_width);
        let mut brush = BrushSettings::default();
        brush.set_size(config.brush_size);

        Self {
            grid: Grid::blank(width, width),
            reference: None,
            painted: PaintedCells::new(),
            history: StrokeHistory::new(),
            gesture: GestureState::Idle,
            brush,
            mode: ConversionMode::default(),
            target_width: width,
            source: None,
            pending_source: None,
            latest_ticket: 0,
            revision: 0,
        }
    }

    /// Get the grid width
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Get the grid height
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Read-only view of the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Reference snapshot of the loaded image, if any
    pub fn reference(&self) -> Option<&[u32]> {
        self.reference.as_deref()
    }

    /// Whether the grid was seeded from an image
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Cells painted by the user
    pub fn painted(&self) -> &PaintedCells {
        &self.painted
    }

    /// Counter bumped whenever the displayed grid changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }

    /// Get the brush settings
    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// Set the active tool
    pub fn set_tool(&mut self, tool: Tool) {
        debug!("set_tool: {:?}", tool);
        self.brush.tool = tool;
    }

    /// Get the active tool
    pub fn tool(&self) -> Tool {
        self.brush.tool
    }

    /// Set the brush size (clamped to the supported range)
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.set_size(size);
    }

    /// Set the paint color
    pub fn set_selected_color(&mut self, color: u32) {
        self.brush.color = color;
    }

    /// Get the paint color
    pub fn selected_color(&self) -> u32 {
        self.brush.color
    }

    /// Converter used for uploaded images
    pub fn conversion_mode(&self) -> ConversionMode {
        self.mode
    }

    /// Requested grid width
    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    /// Per-cell display colors and opacities
    pub fn composite(&self) -> Vec<CompositeCell> {
        composite::composite_cells(&self.grid, self.reference(), &self.painted)
    }

    /// Rasterize the display at `cell_size` screen pixels per cell
    pub fn render_display(
        &self,
        cell_size: u32,
        show_grid: bool,
    ) -> Result<image::RgbaImage, PaintingError> {
        composite::render_display(
            &self.grid,
            self.reference(),
            &self.painted,
            cell_size,
            show_grid,
        )
    }

    /// Flatten for export; only painted cells when any exist
    pub fn flatten(&self, scale: u32) -> Result<image::RgbaImage, PaintingError> {
        export::flatten(&self.grid, Some(&self.painted), scale)
    }

    /// Encode the export raster to PNG bytes off the calling thread
    ///
    /// The grid and painted set are snapshotted before the first await,
    /// so editing may continue while encoding runs.
    pub fn export_png(
        &self,
        scale: u32,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, PaintingError>> + Send + 'static {
        export::export_png(self.grid.clone(), Some(self.painted.clone()), scale)
    }
}
