//! Axis-aligned bounding boxes.

use crate::error::{MapError, Result};

/// Axis-aligned 3D bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3D {
    /// Minimum corner
    pub min: [f64; 3],
    /// Maximum corner
    pub max: [f64; 3],
}

impl Bounds3D {
    /// Bounds of a set of positions, or None if there are none.
    pub fn from_positions(positions: impl IntoIterator<Item = [f64; 3]>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// Check if a position lies inside (inclusive).
    pub fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }
}

/// Axis-aligned 2D bounding box over ground-plane positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Minimum X
    pub min_x: f64,
    /// Maximum X
    pub max_x: f64,
    /// Minimum Y
    pub min_y: f64,
    /// Maximum Y
    pub max_y: f64,
}

impl Bounds2D {
    /// Bounds of a set of planar positions, or None if there are none.
    pub fn from_positions(positions: impl IntoIterator<Item = [f64; 2]>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let [x, y] = iter.next()?;
        let mut bounds = Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        };
        for [x, y] in iter {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a position lies inside (inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Fails with [`MapError::DegenerateGeometry`] if either axis has zero extent.
    ///
    /// Callers treat this as a warning: a degenerate box still yields a
    /// minimum-sized grid.
    pub fn check_extent(&self) -> Result<()> {
        if self.width() > 0.0 && self.height() > 0.0 {
            Ok(())
        } else {
            Err(MapError::DegenerateGeometry {
                width: self.width(),
                height: self.height(),
            })
        }
    }
}
