//! Quadrant grid rasterization.
//!
//! Turns one batch of classified ground points into four dense grids:
//!
//! ```text
//! points ──► bounds ──► grid dims ──► SpatialIndex2D
//!                                        │
//!             for each quadrant, each cell: radius query at cell centre
//!                                        │
//!                       mean of hits ──► (optional) normalize ──► Grid
//! ```
//!
//! Each axis is sized with a single formula,
//! `resolution * (ceil(max(0, max)) - floor(min(0, min))) + 1`, so the
//! grid always reaches the origin and never collapses below one cell.

use std::f64::consts::SQRT_2;
use std::time::Instant;

use crate::core::{Bounds2D, Point2D};
use crate::error::{MapError, Result};
use crate::spatial::SpatialIndex2D;

use super::grid::Grid;
use super::quadrant::{Quadrant, QuadrantGrids};

/// How filled cells are expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueScale {
    /// Mean of the attribute values in range.
    #[default]
    Raw,
    /// Mean rescaled into [0, 1] by the batch-wide value range.
    Normalized,
}

/// Configuration for [`QuadrantGridBuilder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBuilderConfig {
    /// Cells per world unit along each axis.
    ///
    /// Default: 1
    pub resolution: u32,

    /// Raw or normalized cell values.
    ///
    /// Default: Raw
    pub scale: ValueScale,

    /// Value of cells no point reaches.
    ///
    /// Default: 0.0
    pub default_value: f64,
}

impl Default for GridBuilderConfig {
    fn default() -> Self {
        Self {
            resolution: 1,
            scale: ValueScale::Raw,
            default_value: 0.0,
        }
    }
}

impl GridBuilderConfig {
    /// Check that resolution is positive and the default value finite.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(MapError::InvalidParameter(
                "resolution must be positive".to_string(),
            ));
        }
        if !self.default_value.is_finite() {
            return Err(MapError::InvalidParameter(format!(
                "default_value must be finite, got {}",
                self.default_value
            )));
        }
        Ok(())
    }

    /// Query radius reaching the corners of a cell.
    #[inline]
    pub fn cell_half_diagonal(&self) -> f64 {
        SQRT_2 / (2.0 * self.resolution as f64)
    }
}

/// Statistics from one build.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridBuildReport {
    /// Points used after dropping non-finite ones.
    pub points: usize,
    /// Shared (rows, cols) of every quadrant grid.
    pub shape: (usize, usize),
    /// Filled cells per quadrant, in [`Quadrant::ALL`] order.
    pub filled: [usize; 4],
    /// Batch-wide (min, max) attribute value.
    pub value_range: (f64, f64),
    /// Bounding box had zero extent on some axis.
    pub degenerate: bool,
    /// Rasterization time in microseconds.
    pub elapsed_us: u64,
}

impl GridBuildReport {
    /// Filled cells across all quadrants.
    pub fn total_filled(&self) -> usize {
        self.filled.iter().sum()
    }
}

/// Number of cells along one axis spanning `[min, max]` and the origin.
///
/// # Errors
/// [`MapError::InvalidParameter`] if the count does not fit in `usize`.
pub fn axis_cells(min: f64, max: f64, resolution: u32) -> Result<usize> {
    let span = max.max(0.0).ceil() - min.min(0.0).floor();
    let too_large = || {
        MapError::InvalidParameter(format!(
            "axis [{min}, {max}] at resolution {resolution} needs too many cells"
        ))
    };
    // NaN fails this comparison as well
    if !(span < usize::MAX as f64) {
        return Err(too_large());
    }
    (resolution as usize)
        .checked_mul(span as usize)
        .and_then(|cells| cells.checked_add(1))
        .ok_or_else(too_large)
}

/// Rasterizes ground points into four quadrant grids.
#[derive(Clone, Debug)]
pub struct QuadrantGridBuilder {
    config: GridBuilderConfig,
}

impl QuadrantGridBuilder {
    /// Create a builder after validating the configuration.
    pub fn new(config: GridBuilderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builder with default settings at the given resolution.
    pub fn with_resolution(resolution: u32) -> Result<Self> {
        Self::new(GridBuilderConfig {
            resolution,
            ..Default::default()
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &GridBuilderConfig {
        &self.config
    }

    /// Rasterize a batch.
    ///
    /// Fails with [`MapError::EmptyInput`] when no finite point remains.
    pub fn build(&self, points: &[Point2D]) -> Result<QuadrantGrids> {
        self.build_with_report(points).map(|(grids, _)| grids)
    }

    /// Rasterize a batch and return build statistics.
    pub fn build_with_report(&self, points: &[Point2D]) -> Result<(QuadrantGrids, GridBuildReport)> {
        let start = Instant::now();

        let points: Vec<Point2D> = points
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite() && p.value.is_finite())
            .copied()
            .collect();
        let bounds = Bounds2D::from_positions(points.iter().map(Point2D::position))
            .ok_or(MapError::EmptyInput("traversability batch"))?;

        let degenerate = match bounds.check_extent() {
            Ok(()) => false,
            Err(e) => {
                log::debug!("{e}; building minimum-size grid");
                true
            }
        };

        let res = self.config.resolution;
        let rows = axis_cells(bounds.min_y, bounds.max_y, res)?;
        let cols = axis_cells(bounds.min_x, bounds.max_x, res)?;
        if rows.checked_mul(cols).is_none() {
            return Err(MapError::InvalidParameter(format!(
                "grid of {rows}x{cols} cells is too large"
            )));
        }

        let index = SpatialIndex2D::from_ground_points(&points)?;
        let value_range = value_range(&points);

        let rasterized = Quadrant::ALL.map(|quadrant| {
            self.rasterize(quadrant, &points, &index, value_range, (rows, cols))
        });
        let filled = rasterized.each_ref().map(|(_, n)| *n);
        let grids = rasterized.map(|(grid, _)| grid);

        let elapsed_us = start.elapsed().as_micros() as u64;
        log::info!(
            "Rasterized {} points into 4 x {}x{} grids in {:.3}s",
            points.len(),
            rows,
            cols,
            elapsed_us as f64 / 1e6
        );

        let report = GridBuildReport {
            points: points.len(),
            shape: (rows, cols),
            filled,
            value_range,
            degenerate,
            elapsed_us,
        };
        Ok((QuadrantGrids::new(grids, res), report))
    }

    /// Fill one quadrant grid; returns the grid and its filled cell count.
    fn rasterize(
        &self,
        quadrant: Quadrant,
        points: &[Point2D],
        index: &SpatialIndex2D,
        value_range: (f64, f64),
        (rows, cols): (usize, usize),
    ) -> (Grid, usize) {
        let res = self.config.resolution;
        let radius = self.config.cell_half_diagonal();
        let mut grid = Grid::filled(rows, cols, self.config.default_value);
        let mut filled = 0;

        for row in 0..rows {
            for col in 0..cols {
                let hits = index.query_radius(&quadrant.cell_center(row, col, res), radius);
                if hits.is_empty() {
                    continue;
                }
                let mean = hits.iter().map(|&i| points[i].value).sum::<f64>() / hits.len() as f64;
                grid.set(row, col, self.scaled(mean, value_range));
                filled += 1;
            }
        }
        (grid, filled)
    }

    fn scaled(&self, mean: f64, (min, max): (f64, f64)) -> f64 {
        match self.config.scale {
            ValueScale::Raw => mean,
            ValueScale::Normalized if max > min => ((mean - min) / (max - min)).clamp(0.0, 1.0),
            ValueScale::Normalized => 0.0,
        }
    }
}

fn value_range(points: &[Point2D]) -> (f64, f64) {
    points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        })
}
