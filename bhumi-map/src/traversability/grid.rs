//! Dense 2D value grid handed to the path planner.

use serde::{Deserialize, Serialize};

/// Dense row-major grid of `f64` values.
///
/// Cells are addressed by non-negative `(row, col)`; every cell starts at
/// the value given at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Number of rows (Y cells).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (X cells).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Value at `(row, col)`, None if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.offset(row, col).map(|i| self.cells[i])
    }

    /// Set the value at `(row, col)`. Returns false if out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f64] {
        &self.cells
    }

    /// One row of cells, None if out of range.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Copy into nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let grid = Grid::filled(2, 3, 0.0);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.cell_count(), 6);
        assert!(grid.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::filled(2, 3, 0.0);
        assert!(grid.set(1, 2, 0.7));
        assert_eq!(grid.get(1, 2), Some(0.7));
        assert_eq!(grid.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = Grid::filled(2, 3, 1.0);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(!grid.set(5, 5, 0.0));
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn test_rows() {
        let mut grid = Grid::filled(2, 2, 0.0);
        grid.set(1, 0, 3.0);
        assert_eq!(grid.row(1), Some(&[3.0, 0.0][..]));
        assert_eq!(grid.to_rows(), vec![vec![0.0, 0.0], vec![3.0, 0.0]]);
    }
}
