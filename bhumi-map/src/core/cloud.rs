//! Point cloud container.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds3D;
use super::point::{Point3D, Rgb};

/// Ordered collection of 3D points.
///
/// Insertion order does not matter to any spatial query. It is kept so
/// iteration is deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCloud3D<A = Rgb> {
    /// Points in insertion order
    pub points: Vec<Point3D<A>>,
}

impl<A> Default for PointCloud3D<A> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<A> PointCloud3D<A> {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cloud with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Wrap an existing vector of points.
    pub fn from_points(points: Vec<Point3D<A>>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point.
    #[inline]
    pub fn push(&mut self, point: Point3D<A>) {
        self.points.push(point);
    }

    /// Iterate over points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3D<A>> {
        self.points.iter()
    }

    /// Positions of all points.
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(Point3D::position).collect()
    }

    /// Axis-aligned bounds, or None for an empty cloud.
    pub fn bounds(&self) -> Option<Bounds3D> {
        Bounds3D::from_positions(self.points.iter().map(Point3D::position))
    }
}

impl<A: Copy> PointCloud3D<A> {
    /// Append all points of another cloud.
    pub fn extend_from(&mut self, other: &PointCloud3D<A>) {
        self.points.extend_from_slice(&other.points);
    }

    /// Keep points for which `keep` returns true.
    pub fn filtered(&self, mut keep: impl FnMut(&Point3D<A>) -> bool) -> Self {
        Self {
            points: self.points.iter().copied().filter(|p| keep(p)).collect(),
        }
    }
}

impl PointCloud3D<Rgb> {
    /// Flat (x, y, z, r, g, b) records for publishing.
    pub fn to_records(&self) -> Vec<[f32; 6]> {
        self.points
            .iter()
            .map(|p| {
                [
                    p.x as f32,
                    p.y as f32,
                    p.z as f32,
                    p.attr.r as f32,
                    p.attr.g as f32,
                    p.attr.b as f32,
                ]
            })
            .collect()
    }
}

impl PointCloud3D<f64> {
    /// Flat (x, y, z, intensity) records for publishing.
    pub fn to_records(&self) -> Vec<[f32; 4]> {
        self.points
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32, p.attr as f32])
            .collect()
    }
}

impl<A> FromIterator<Point3D<A>> for PointCloud3D<A> {
    fn from_iter<I: IntoIterator<Item = Point3D<A>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a, A> IntoIterator for &'a PointCloud3D<A> {
    type Item = &'a Point3D<A>;
    type IntoIter = std::slice::Iter<'a, Point3D<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
