//! Set of cells the user has explicitly painted

use std::collections::HashSet;

/// Indices of user-painted cells
///
/// Cells outside this set still show the faded reference image (or the
/// blank background). Emptied whenever the grid is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintedCells {
    cells: HashSet<usize>,
}

impl PaintedCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cell as painted. Returns true if it was not painted before.
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        self.cells.insert(idx)
    }

    /// Unmark a cell. Returns true if it was painted.
    #[inline]
    pub fn remove(&mut self, idx: usize) -> bool {
        self.cells.remove(&idx)
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.cells.contains(&idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Painted indices in ascending order
    pub fn sorted(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<usize> for PaintedCells {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut cells = PaintedCells::new();
        assert!(cells.insert(3));
        assert!(!cells.insert(3));
        assert!(cells.contains(3));
        assert_eq!(cells.len(), 1);

        assert!(cells.remove(3));
        assert!(!cells.remove(3));
        assert!(cells.is_empty());
    }

    #[test]
    fn test_sorted() {
        let cells: PaintedCells = [9, 1, 4].into_iter().collect();
        assert_eq!(cells.sorted(), vec![1, 4, 9]);
    }
}
