//! Shared configuration for Pixel Painter
//!
//! This crate provides the single source of truth for grid dimensions,
//! zoom, brush and export settings, and the fixed constants used by the
//! image converters and the display compositor.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Smallest grid edge the converters will produce
pub const MIN_GRID_DIM: u32 = 8;

/// Largest grid edge the converters will produce
pub const MAX_GRID_DIM: u32 = 256;

/// Default grid width (and height, for blank canvases)
pub const DEFAULT_GRID_WIDTH: u32 = 32;

/// Default on-screen size of one cell in pixels
pub const DEFAULT_CELL_SIZE: u32 = 12;

/// Zoom bounds (screen pixels per cell)
pub const CELL_SIZE_RANGE: RangeInclusive<u32> = 2..=32;

/// Default export scale factor
pub const DEFAULT_EXPORT_SCALE: u32 = 16;

/// Export scale factors offered to the user
pub const EXPORT_SCALES: [u32; 5] = [8, 12, 16, 24, 32];

/// Default brush edge length in cells
pub const DEFAULT_BRUSH_SIZE: u32 = 1;

/// Brush edge length bounds in cells
pub const BRUSH_SIZE_RANGE: RangeInclusive<u32> = 1..=16;

/// Opacity of unpainted reference cells once the user has started painting
pub const REFERENCE_FADE_ALPHA: f32 = 0.45;

/// Grid lines are only drawn when a cell is at least this many screen pixels
pub const GRID_LINE_MIN_CELL_SIZE: u32 = 4;

/// Opacity of grid lines
pub const GRID_LINE_ALPHA: f32 = 0.15;

/// Supersampling factor of the outline converter
pub const OUTLINE_SCALE: u32 = 8;

/// Sobel magnitude above which an outline block is considered an edge
pub const OUTLINE_THRESHOLD: f32 = 40.0;

const ENV_GRID_WIDTH: &str = "PIXEL_PAINTER_GRID_WIDTH";
const ENV_CELL_SIZE: &str = "PIXEL_PAINTER_CELL_SIZE";
const ENV_EXPORT_SCALE: &str = "PIXEL_PAINTER_EXPORT_SCALE";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Target grid width used for blank canvases and image conversion
    pub grid_width: u32,
    /// Screen pixels per cell
    pub cell_size: u32,
    /// Draw cell boundaries on screen
    pub show_grid: bool,
    /// Pixels per cell in exported images
    pub export_scale: u32,
    /// Brush edge length in cells
    pub brush_size: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            cell_size: DEFAULT_CELL_SIZE,
            show_grid: true,
            export_scale: DEFAULT_EXPORT_SCALE,
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

impl EditorConfig {
    /// Defaults overlaid with `PIXEL_PAINTER_*` environment variables.
    ///
    /// Unset or unparseable variables keep their default value.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u32>().ok());

        if let Some(width) = parse(ENV_GRID_WIDTH) {
            self.grid_width = width;
        }
        if let Some(size) = parse(ENV_CELL_SIZE) {
            self.cell_size = size;
        }
        if let Some(scale) = parse(ENV_EXPORT_SCALE) {
            self.export_scale = scale;
        }
        self.sanitized()
    }

    /// Clamp every field into its legal range
    pub fn sanitized(mut self) -> Self {
        self.grid_width = clamp_grid_dim(self.grid_width);
        self.cell_size = self
            .cell_size
            .clamp(*CELL_SIZE_RANGE.start(), *CELL_SIZE_RANGE.end());
        self.brush_size = clamp_brush_size(self.brush_size);
        self.export_scale = self.export_scale.max(1);
        self
    }

    /// Whether grid lines should be drawn at the current zoom
    pub fn grid_lines_visible(&self) -> bool {
        self.show_grid && self.cell_size >= GRID_LINE_MIN_CELL_SIZE
    }
}

/// Clamp a grid edge into `[MIN_GRID_DIM, MAX_GRID_DIM]`
pub fn clamp_grid_dim(value: u32) -> u32 {
    value.clamp(MIN_GRID_DIM, MAX_GRID_DIM)
}

/// Clamp a brush size into [`BRUSH_SIZE_RANGE`]
pub fn clamp_brush_size(value: u32) -> u32 {
    value.clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.grid_width, DEFAULT_GRID_WIDTH);
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(config.export_scale, DEFAULT_EXPORT_SCALE);
        assert!(config.show_grid);
        assert!(EXPORT_SCALES.contains(&config.export_scale));
    }

    #[test]
    fn test_sanitized_clamps_fields() {
        let config = EditorConfig {
            grid_width: 4,
            cell_size: 100,
            show_grid: false,
            export_scale: 0,
            brush_size: 0,
        }
        .sanitized();

        assert_eq!(config.grid_width, MIN_GRID_DIM);
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.export_scale, 1);
        assert_eq!(config.brush_size, 1);
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::default().with_overrides(|key| match key {
            "PIXEL_PAINTER_GRID_WIDTH" => Some("64".to_string()),
            "PIXEL_PAINTER_CELL_SIZE" => Some("not a number".to_string()),
            "PIXEL_PAINTER_EXPORT_SCALE" => Some(" 24 ".to_string()),
            _ => None,
        });

        assert_eq!(config.grid_width, 64);
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(config.export_scale, 24);
    }

    #[test]
    fn test_grid_lines_visibility() {
        let mut config = EditorConfig::default();
        assert!(config.grid_lines_visible());

        config.cell_size = 3;
        assert!(!config.grid_lines_visible());

        config.cell_size = 12;
        config.show_grid = false;
        assert!(!config.grid_lines_visible());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"grid_width": 48}"#).unwrap();
        assert_eq!(config.grid_width, 48);
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
    }
}
