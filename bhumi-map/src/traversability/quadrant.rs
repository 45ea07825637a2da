//! Quadrant partition of the ground plane.
//!
//! The planner works on non-negative grid indices, so each coordinate sign
//! region gets its own grid addressed by mirrored coordinates:
//!
//! ```text
//!            +Y
//!      Q2    │    Q1
//!    (-x,+y) │  (+x,+y)
//!  ──────────┼──────────► +X
//!      Q3    │    Q4
//!    (-x,-y) │  (+x,-y)
//! ```
//!
//! Cell `(row, col)` of a quadrant is centred on world position
//! `(sx * col / resolution, sy * row / resolution)` where `(sx, sy)` are
//! the quadrant's sign multipliers.

use super::grid::Grid;

/// One of the four coordinate sign regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// x ≥ 0, y ≥ 0
    Q1,
    /// x < 0, y ≥ 0
    Q2,
    /// x < 0, y < 0
    Q3,
    /// x ≥ 0, y < 0
    Q4,
}

impl Quadrant {
    /// All quadrants in planner order.
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    /// X and Y sign multipliers.
    #[inline]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Quadrant::Q1 => (1.0, 1.0),
            Quadrant::Q2 => (-1.0, 1.0),
            Quadrant::Q3 => (-1.0, -1.0),
            Quadrant::Q4 => (1.0, -1.0),
        }
    }

    /// Quadrant a world position belongs to.
    pub fn of(x: f64, y: f64) -> Self {
        match (x >= 0.0, y >= 0.0) {
            (true, true) => Quadrant::Q1,
            (false, true) => Quadrant::Q2,
            (false, false) => Quadrant::Q3,
            (true, false) => Quadrant::Q4,
        }
    }

    /// World-space centre of cell `(row, col)`.
    #[inline]
    pub fn cell_center(self, row: usize, col: usize, resolution: u32) -> [f64; 2] {
        let (sx, sy) = self.signs();
        let res = resolution as f64;
        [sx * col as f64 / res, sy * row as f64 / res]
    }

    fn slot(self) -> usize {
        match self {
            Quadrant::Q1 => 0,
            Quadrant::Q2 => 1,
            Quadrant::Q3 => 2,
            Quadrant::Q4 => 3,
        }
    }
}

/// The four quadrant grids produced for one batch.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadrantGrids {
    grids: [Grid; 4],
    resolution: u32,
}

impl QuadrantGrids {
    /// Assemble from grids in [`Quadrant::ALL`] order.
    pub fn new(grids: [Grid; 4], resolution: u32) -> Self {
        Self { grids, resolution }
    }

    /// Four uniform grids, used when no map can be built from the batch.
    pub fn fallback(rows: usize, cols: usize, value: f64, resolution: u32) -> Self {
        let grid = Grid::filled(rows, cols, value);
        Self::new(
            [grid.clone(), grid.clone(), grid.clone(), grid],
            resolution,
        )
    }

    /// Cells per world unit.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Grid for one quadrant.
    pub fn get(&self, quadrant: Quadrant) -> &Grid {
        &self.grids[quadrant.slot()]
    }

    /// Iterate quadrants with their grids.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &Grid)> {
        Quadrant::ALL.into_iter().zip(self.grids.iter())
    }

    /// Consume into grids in [`Quadrant::ALL`] order.
    pub fn into_grids(self) -> [Grid; 4] {
        self.grids
    }

    /// Quadrant and `(row, col)` of the cell nearest a world position.
    ///
    /// None if the position falls outside the quadrant's grid.
    pub fn cell_for(&self, x: f64, y: f64) -> Option<(Quadrant, usize, usize)> {
        let quadrant = Quadrant::of(x, y);
        let res = self.resolution as f64;
        let col = (x.abs() * res).round();
        let row = (y.abs() * res).round();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        let grid = self.get(quadrant);
        (row < grid.rows() && col < grid.cols()).then_some((quadrant, row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_of() {
        assert_eq!(Quadrant::of(0.0, 0.0), Quadrant::Q1);
        assert_eq!(Quadrant::of(-0.1, 2.0), Quadrant::Q2);
        assert_eq!(Quadrant::of(-1.0, -1.0), Quadrant::Q3);
        assert_eq!(Quadrant::of(3.0, -0.5), Quadrant::Q4);
    }

    #[test]
    fn test_cell_center_mirrored() {
        assert_eq!(Quadrant::Q1.cell_center(2, 3, 1), [3.0, 2.0]);
        assert_eq!(Quadrant::Q2.cell_center(2, 3, 2), [-1.5, 1.0]);
        assert_eq!(Quadrant::Q3.cell_center(1, 1, 1), [-1.0, -1.0]);
        assert_eq!(Quadrant::Q4.cell_center(4, 0, 4), [0.0, -1.0]);
    }

    #[test]
    fn test_fallback() {
        let grids = QuadrantGrids::fallback(3, 4, 1.0, 1);
        for (_, grid) in grids.iter() {
            assert_eq!(grid.shape(), (3, 4));
            assert!(grid.values().iter().all(|&v| v == 1.0));
        }
    }

    #[test]
    fn test_cell_for() {
        let grids = QuadrantGrids::fallback(3, 3, 0.0, 1);
        assert_eq!(grids.cell_for(1.2, 2.0), Some((Quadrant::Q1, 2, 1)));
        assert_eq!(grids.cell_for(-2.0, -0.4), Some((Quadrant::Q3, 0, 2)));
        assert_eq!(grids.cell_for(5.0, 0.0), None);
    }
}
