//! Voxel-grid downsampling for point clouds.
//!
//! Partitions space into cubes of edge `voxel_size` anchored at the world
//! origin. Every occupied cube yields one point whose position and
//! attribute are the means over the points that fell into it.

use std::collections::BTreeMap;

use crate::core::{Attribute, Point3D, PointCloud3D};
use crate::error::{MapError, Result};

/// Configuration for voxel downsampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelDownsamplerConfig {
    /// Voxel edge length in meters.
    ///
    /// Default: 0.5
    pub voxel_size: f64,
}

impl Default for VoxelDownsamplerConfig {
    fn default() -> Self {
        Self { voxel_size: 0.5 }
    }
}

impl VoxelDownsamplerConfig {
    /// Check that the voxel size is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if self.voxel_size.is_finite() && self.voxel_size > 0.0 {
            Ok(())
        } else {
            Err(MapError::InvalidParameter(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )))
        }
    }
}

/// Integer voxel coordinates.
type VoxelKey = (i64, i64, i64);

/// Upper bound on ulp steps when pulling a mean back into its voxel.
const MAX_SNAP_STEPS: usize = 64;

/// Adjacent representable value towards +inf (`up`) or -inf.
fn step_ulp(x: f64, up: bool) -> f64 {
    if x == 0.0 {
        let tiny = f64::from_bits(1);
        return if up { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    if (x > 0.0) == up {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Running sums for one voxel.
#[derive(Clone, Copy)]
struct VoxelSum<A> {
    x: f64,
    y: f64,
    z: f64,
    attr: A,
    count: usize,
}

impl<A: Attribute> VoxelSum<A> {
    fn add(&mut self, p: &Point3D<A>) {
        self.x += p.x;
        self.y += p.y;
        self.z += p.z;
        self.attr.accumulate(&p.attr);
        self.count += 1;
    }

    fn mean(&self) -> Point3D<A> {
        let inv = 1.0 / self.count as f64;
        Point3D::new(
            self.x * inv,
            self.y * inv,
            self.z * inv,
            self.attr.scaled(inv),
        )
    }
}

impl<A: Attribute> Default for VoxelSum<A> {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            attr: A::default(),
            count: 0,
        }
    }
}

/// Voxel-grid downsampler.
///
/// Output points are ordered by voxel coordinate, so the result does not
/// depend on input order (up to floating-point summation order). Each mean
/// is pulled back into its own voxel when rounding pushes it across a face,
/// so downsampling an already downsampled cloud with the same voxel size
/// is a no-op.
#[derive(Debug, Clone)]
pub struct VoxelDownsampler {
    config: VoxelDownsamplerConfig,
    inv_voxel_size: f64,
}

impl VoxelDownsampler {
    /// Create a downsampler, validating the voxel size.
    pub fn new(config: VoxelDownsamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            inv_voxel_size: 1.0 / config.voxel_size,
        })
    }

    /// Create a downsampler for a given voxel size.
    pub fn with_voxel_size(voxel_size: f64) -> Result<Self> {
        Self::new(VoxelDownsamplerConfig { voxel_size })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &VoxelDownsamplerConfig {
        &self.config
    }

    #[inline]
    fn axis_key(&self, coord: f64) -> i64 {
        (coord * self.inv_voxel_size).floor() as i64
    }

    /// Voxel containing a position.
    #[inline]
    fn key<A>(&self, p: &Point3D<A>) -> VoxelKey {
        (self.axis_key(p.x), self.axis_key(p.y), self.axis_key(p.z))
    }

    /// Nearest value to `coord` whose axis key is `key`.
    ///
    /// A mean of points on a voxel face can round one ulp past it.
    fn snap(&self, coord: f64, key: i64) -> f64 {
        let mut coord = coord;
        for _ in 0..MAX_SNAP_STEPS {
            let current = self.axis_key(coord);
            if current == key {
                break;
            }
            coord = step_ulp(coord, current < key);
        }
        coord
    }

    fn snap_into_voxel<A>(&self, mut p: Point3D<A>, (kx, ky, kz): VoxelKey) -> Point3D<A> {
        p.x = self.snap(p.x, kx);
        p.y = self.snap(p.y, ky);
        p.z = self.snap(p.z, kz);
        p
    }

    /// Downsample a cloud.
    ///
    /// Points with a non-finite coordinate are dropped; the output is empty
    /// iff the input has no finite point.
    pub fn apply<A: Attribute>(&self, cloud: &PointCloud3D<A>) -> PointCloud3D<A> {
        if cloud.is_empty() {
            return PointCloud3D::new();
        }

        let mut voxels: BTreeMap<VoxelKey, VoxelSum<A>> = BTreeMap::new();
        for point in cloud.iter().filter(|p| p.is_finite()) {
            voxels.entry(self.key(point)).or_default().add(point);
        }

        voxels
            .iter()
            .map(|(&key, sum)| self.snap_into_voxel(sum.mean(), key))
            .collect()
    }
}

/// Downsample `cloud` with cubes of edge `voxel_size`.
///
/// # Errors
/// [`MapError::InvalidParameter`] if `voxel_size` is not positive.
pub fn downsample<A: Attribute>(
    cloud: &PointCloud3D<A>,
    voxel_size: f64,
) -> Result<PointCloud3D<A>> {
    Ok(VoxelDownsampler::with_voxel_size(voxel_size)?.apply(cloud))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgb;
    use approx::assert_relative_eq;

    fn colored(x: f64, y: f64, z: f64, r: f64) -> Point3D<Rgb> {
        Point3D::new(x, y, z, Rgb::new(r, 0.0, 1.0 - r))
    }

    #[test]
    fn test_invalid_voxel_size() {
        assert!(VoxelDownsampler::with_voxel_size(0.0).is_err());
        assert!(VoxelDownsampler::with_voxel_size(-1.0).is_err());
        assert!(VoxelDownsampler::with_voxel_size(f64::NAN).is_err());
    }

    #[test]
    fn test_empty_in_empty_out() {
        let cloud: PointCloud3D = PointCloud3D::new();
        assert!(downsample(&cloud, 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_same_voxel_averaged() {
        let cloud = PointCloud3D::from_points(vec![
            colored(0.1, 0.1, 0.1, 0.0),
            colored(0.3, 0.2, 0.4, 1.0),
        ]);
        let out = downsample(&cloud, 0.5).unwrap();

        assert_eq!(out.len(), 1);
        let p = out.points[0];
        assert_relative_eq!(p.x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.15, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.25, epsilon = 1e-12);
        assert_relative_eq!(p.attr.r, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.attr.b, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_separate_voxels_kept() {
        let cloud = PointCloud3D::from_points(vec![
            colored(0.1, 0.0, 0.0, 0.0),
            colored(0.6, 0.0, 0.0, 0.0),
            colored(-0.1, 0.0, 0.0, 0.0),
        ]);
        assert_eq!(downsample(&cloud, 0.5).unwrap().len(), 3);
    }

    #[test]
    fn test_negative_coordinates_use_floor() {
        // -0.1 and 0.1 straddle the origin and must not share a voxel.
        let cloud = PointCloud3D::from_points(vec![
            Point3D::new(-0.1, 0.0, 0.0, 1.0),
            Point3D::new(0.1, 0.0, 0.0, 3.0),
        ]);
        assert_eq!(downsample(&cloud, 1.0).unwrap().len(), 2);
    }

    #[test]
    fn test_intensity_mean() {
        let cloud = PointCloud3D::from_points(vec![
            Point3D::new(0.0, 0.0, 0.0, 1.0),
            Point3D::new(0.1, 0.0, 0.0, 2.0),
            Point3D::new(0.2, 0.0, 0.0, 6.0),
        ]);
        let out = downsample(&cloud, 1.0).unwrap();
        assert_relative_eq!(out.points[0].attr, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_order_independent() {
        let points: Vec<Point3D<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.37;
                Point3D::new(t.sin() * 2.0, t.cos() * 2.0, t * 0.05, t)
            })
            .collect();
        let forward = PointCloud3D::from_points(points.clone());
        let reversed = PointCloud3D::from_points(points.into_iter().rev().collect());

        let a = downsample(&forward, 0.4).unwrap();
        let b = downsample(&reversed, 0.4).unwrap();
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_relative_eq!(pa.x, pb.x, epsilon = 1e-9);
            assert_relative_eq!(pa.y, pb.y, epsilon = 1e-9);
            assert_relative_eq!(pa.z, pb.z, epsilon = 1e-9);
            assert_relative_eq!(pa.attr, pb.attr, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_position_only_cloud() {
        let cloud = PointCloud3D::from_points(vec![Point3D::at(0.0, 0.0, 0.0); 10]);
        assert_eq!(downsample(&cloud, 0.25).unwrap().len(), 1);
    }

    #[test]
    fn test_non_finite_dropped() {
        let cloud = PointCloud3D::from_points(vec![
            Point3D::new(f64::NAN, 0.0, 0.0, 9.0),
            Point3D::new(0.1, 0.1, 0.1, 1.0),
        ]);
        let out = downsample(&cloud, 0.5).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out.points[0].attr, 1.0);
    }

    #[test]
    fn test_idempotent_on_voxel_faces() {
        for voxel in [0.1, 0.3, 0.35, 0.7] {
            for k in -200..200 {
                let face = k as f64 * voxel;
                let mut points = vec![Point3D::at(face, face, 0.0); 10];
                points.push(Point3D::at(face - voxel / 2.0, face, 0.0));
                let cloud = PointCloud3D::from_points(points);

                let once = downsample(&cloud, voxel).unwrap();
                let twice = downsample(&once, voxel).unwrap();
                assert_eq!(once.len(), twice.len(), "voxel {voxel}, face {face}");
                assert_eq!(once.positions(), twice.positions());
            }
        }
    }

    #[test]
    fn test_step_ulp() {
        assert!(step_ulp(1.0, true) > 1.0);
        assert!(step_ulp(1.0, false) < 1.0);
        assert!(step_ulp(-1.0, true) > -1.0);
        assert!(step_ulp(-1.0, false) < -1.0);
        assert!(step_ulp(0.0, true) > 0.0);
        assert!(step_ulp(0.0, false) < 0.0);
    }
}
