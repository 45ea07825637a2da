//! Point spatial index for nearest-neighbor and radius queries.
//!
//! Uses an R-tree bulk-loaded from a snapshot of positions:
//! - Nearest point to a query position
//! - All points within a radius (boundary inclusive)
//!
//! The index has no mutation operations. When the backing point set
//! changes it must be rebuilt.

use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};

use crate::core::{Point2D, PointCloud3D};
use crate::error::{MapError, Result};

/// Position types the index can hold (`[f64; 2]`, `[f64; 3]`).
pub trait IndexPoint: rstar::Point<Scalar = f64> + Copy {
    /// True if every coordinate is finite.
    fn is_finite(&self) -> bool {
        (0..Self::DIMENSIONS).all(|axis| self.nth(axis).is_finite())
    }
}

impl<P: rstar::Point<Scalar = f64> + Copy> IndexPoint for P {}

/// Result of a nearest-neighbor query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Index of the point in the snapshot the index was built from
    pub index: usize,
    /// Euclidean distance to the query position
    pub distance: f64,
}

/// Spatial index over a fixed snapshot of positions.
///
/// # Example
/// ```rust
/// use bhumi_map::spatial::SpatialIndex;
///
/// let index = SpatialIndex::build(vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();
///
/// let nearest = index.query_nearest(&[0.5, 0.0, 0.0]).unwrap();
/// assert_eq!(nearest.index, 0);
///
/// let hits = index.query_radius(&[1.0, 0.0, 0.0], 1.0);
/// assert_eq!(hits.len(), 2);
/// ```
#[derive(Clone)]
pub struct SpatialIndex<P: IndexPoint> {
    tree: RTree<GeomWithData<P, usize>>,
}

/// Index over 3D positions (stitching reference maps).
pub type SpatialIndex3D = SpatialIndex<[f64; 3]>;

/// Index over ground-plane positions (traversability gridding).
pub type SpatialIndex2D = SpatialIndex<[f64; 2]>;

impl<P: IndexPoint> SpatialIndex<P> {
    /// Build an index from positions.
    ///
    /// Query results refer to points by their position in `positions`.
    /// Positions must be finite.
    ///
    /// # Errors
    /// [`MapError::EmptyInput`] if `positions` is empty.
    pub fn build(positions: Vec<P>) -> Result<Self> {
        if positions.is_empty() {
            return Err(MapError::EmptyInput("spatial index needs at least one point"));
        }

        let items: Vec<GeomWithData<P, usize>> = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new(p, i))
            .collect();

        Ok(Self {
            tree: RTree::bulk_load(items),
        })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True if the index holds no points (never the case after `build`).
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the closest indexed point.
    ///
    /// Returns None for a query with a NaN or infinite coordinate.
    pub fn query_nearest(&self, query: &P) -> Option<Neighbor> {
        if !query.is_finite() {
            return None;
        }
        self.tree.nearest_neighbor(query).map(|item| Neighbor {
            index: item.data,
            distance: item.distance_2(query).sqrt(),
        })
    }

    /// Find all indexed points within `radius` of `center` (inclusive).
    ///
    /// Order is unspecified but stable for a given build. A non-finite
    /// center matches nothing.
    pub fn query_radius(&self, center: &P, radius: f64) -> Vec<usize> {
        if radius.is_nan() || radius < 0.0 || !center.is_finite() {
            return Vec::new();
        }
        self.tree
            .locate_within_distance(*center, radius * radius)
            .map(|item| item.data)
            .collect()
    }
}

impl SpatialIndex<[f64; 3]> {
    /// Build an index over the finite positions of a cloud.
    ///
    /// Points with a NaN or infinite coordinate are skipped, so neighbor
    /// indices count finite points only.
    pub fn from_cloud<A>(cloud: &PointCloud3D<A>) -> Result<Self> {
        Self::build(
            cloud
                .iter()
                .filter(|p| p.is_finite())
                .map(|p| p.position())
                .collect(),
        )
    }
}

impl SpatialIndex<[f64; 2]> {
    /// Build an index over ground-plane positions.
    pub fn from_ground_points(points: &[Point2D]) -> Result<Self> {
        Self::build(points.iter().map(Point2D::position).collect())
    }
}
