//! Traversability gridding.
//!
//! Converts a sparse batch of classified ground points into four dense
//! quadrant grids for the path planner. Grids are rebuilt from scratch
//! for every batch and carry no state between calls.

mod builder;
mod grid;
mod quadrant;

pub use builder::{GridBuildReport, GridBuilderConfig, QuadrantGridBuilder, ValueScale, axis_cells};
pub use grid::Grid;
pub use quadrant::{Quadrant, QuadrantGrids};
