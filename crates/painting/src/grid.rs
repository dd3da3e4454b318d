//! Pixel grid - packed ARGB cells in row-major order

use crate::constants::WHITE;
use crate::error::PaintingError;

/// A rectangular grid of packed `0xAARRGGBB` colors
///
/// Width, height and the color buffer are only ever replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Cell colors in row-major order, `idx = y * width + x`
    colors: Vec<u32>,
}

impl Grid {
    /// Create a grid filled with opaque white
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, WHITE)
    }

    /// Create a grid filled with a single color
    ///
    /// A zero dimension yields an empty grid with no addressable cells.
    pub fn filled(width: u32, height: u32, color: u32) -> Self {
        let cell_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            colors: vec![color; cell_count],
        }
    }

    /// Wrap an existing color buffer
    ///
    /// Fails if either dimension is zero or the buffer length does not
    /// match `width * height`.
    pub fn from_colors(width: u32, height: u32, colors: Vec<u32>) -> Result<Self, PaintingError> {
        if width == 0 || height == 0 || colors.len() != (width as usize) * (height as usize) {
            return Err(PaintingError::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            colors,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.colors.len()
    }

    /// Linear index for a cell, or None if the coordinates are off-grid
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Cell coordinates for a linear index, or None if it is out of range
    #[inline]
    pub fn coords_of(&self, idx: usize) -> Option<(u32, u32)> {
        if idx >= self.colors.len() {
            return None;
        }
        let width = self.width as usize;
        Some(((idx % width) as u32, (idx / width) as u32))
    }

    /// Color at a linear index
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u32> {
        self.colors.get(idx).copied()
    }

    /// Color at cell coordinates
    #[inline]
    pub fn get_xy(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y).map(|idx| self.colors[idx])
    }

    /// Write a color at a linear index
    /// Does nothing if the index is out of bounds
    #[inline]
    pub(crate) fn set(&mut self, idx: usize, color: u32) {
        if let Some(cell) = self.colors.get_mut(idx) {
            *cell = color;
        }
    }

    /// Read-only view of all cells
    #[inline]
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_grid() {
        for (w, h) in [(1, 1), (8, 8), (32, 17), (256, 256)] {
            let grid = Grid::blank(w, h);
            assert_eq!(grid.cell_count(), (w * h) as usize);
            assert!(grid.colors().iter().all(|&c| c == WHITE));
        }
    }

    #[test]
    fn test_index_mapping() {
        let grid = Grid::blank(4, 3);
        assert_eq!(grid.index_of(0, 0), Some(0));
        assert_eq!(grid.index_of(3, 0), Some(3));
        assert_eq!(grid.index_of(1, 2), Some(9));
        assert_eq!(grid.coords_of(9), Some((1, 2)));
        assert_eq!(grid.coords_of(12), None);

        assert_eq!(grid.index_of(4, 0), None);
        assert_eq!(grid.index_of(0, 3), None);
        assert_eq!(grid.index_of(-1, 0), None);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::blank(4, 4);
        grid.set(5, 0xFF00FF00);
        assert_eq!(grid.get(5), Some(0xFF00FF00));
        assert_eq!(grid.get_xy(1, 1), Some(0xFF00FF00));

        // Out of bounds is a no-op
        grid.set(100, 0);
        assert_eq!(grid.get(100), None);
    }

    #[test]
    fn test_zero_width_grid_has_no_cells() {
        let grid = Grid::blank(0, 5);
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.coords_of(0), None);
        assert_eq!(grid.index_of(0, 0), None);
        assert_eq!(grid.get_xy(0, 0), None);
    }

    #[test]
    fn test_from_colors_validates_length() {
        assert!(Grid::from_colors(2, 2, vec![WHITE; 4]).is_ok());
        assert!(matches!(
            Grid::from_colors(2, 2, vec![WHITE; 3]),
            Err(PaintingError::InvalidGeometry { .. })
        ));
        assert!(Grid::from_colors(0, 2, Vec::new()).is_err());
    }
}
