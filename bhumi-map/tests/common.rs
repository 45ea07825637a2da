//! Test utilities for bhumi-map.
//!
//! Helpers for building reference maps, segmented batches, and ground
//! point sets.

#![allow(dead_code)]

use std::num::Wrapping;

use bhumi_map::{Point2D, Point3D, PointCloud3D, Rgb, TerrainClass};

/// Deterministic uniform samples in [0, 1).
pub struct Lcg(Wrapping<u64>);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(Wrapping(seed))
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = Wrapping(6364136223846793005u64) * self.0 + Wrapping(1442695040888963407u64);
        (self.0.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Flat floor reference: a `size x size` lattice at z = 0.
pub fn floor_reference(size: f64, spacing: f64) -> PointCloud3D<()> {
    let n = (size / spacing).round() as usize;
    let mut cloud = PointCloud3D::with_capacity((n + 1) * (n + 1));
    for i in 0..=n {
        for j in 0..=n {
            cloud.push(Point3D::at(i as f64 * spacing, j as f64 * spacing, 0.0));
        }
    }
    cloud
}

/// Colored points scattered over `[x0, x0 + w] x [y0, y0 + h]` at height `z`.
pub fn colored_patch(
    rng: &mut Lcg,
    n: usize,
    (x0, y0): (f64, f64),
    (w, h): (f64, f64),
    z: f64,
    class: TerrainClass,
) -> PointCloud3D<Rgb> {
    (0..n)
        .map(|_| {
            Point3D::new(
                rng.range(x0, x0 + w),
                rng.range(y0, y0 + h),
                z,
                class.color(),
            )
        })
        .collect()
}

/// Ground points spread over `[-extent, extent]^2` with values in [0, 1].
pub fn ground_points(rng: &mut Lcg, n: usize, extent: f64) -> Vec<Point2D> {
    (0..n)
        .map(|_| {
            Point2D::new(
                rng.range(-extent, extent),
                rng.range(-extent, extent),
                rng.next_f64(),
            )
        })
        .collect()
}

/// Sort points by position so clouds can be compared regardless of order.
pub fn sorted_positions(cloud: &PointCloud3D<Rgb>) -> Vec<[f64; 3]> {
    let mut positions = cloud.positions();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    positions
}
