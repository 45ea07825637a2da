//! Rigid-body transforms between sensor and map frames.

use serde::{Deserialize, Serialize};

use super::cloud::PointCloud3D;

/// Translation plus unit-quaternion rotation.
///
/// The quaternion is stored as `[x, y, z, w]`, the order used by ROS
/// `geometry_msgs/Transform`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Translation in meters
    pub translation: [f64; 3],
    /// Rotation quaternion (x, y, z, w)
    pub rotation: [f64; 4],
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Create a transform from translation and quaternion (x, y, z, w).
    pub fn new(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Identity transform.
    pub const fn identity() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Rotation about +Z by `yaw` radians followed by a translation.
    pub fn from_yaw(translation: [f64; 3], yaw: f64) -> Self {
        let (s, c) = (yaw * 0.5).sin_cos();
        Self::new(translation, [0.0, 0.0, s, c])
    }

    /// Homogeneous 4x4 matrix (row-major).
    ///
    /// Assumes a unit quaternion, as delivered by a TF lookup.
    pub fn matrix(&self) -> [[f64; 4]; 4] {
        let [x, y, z, w] = self.rotation;
        let [tx, ty, tz] = self.translation;
        [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
                tx,
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
                ty,
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
                tz,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    /// Transform a single position.
    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        let m = self.matrix();
        Self::apply_matrix(&m, p)
    }

    /// Transform every point of a cloud in place. Attributes are untouched.
    pub fn apply_to_cloud<A>(&self, cloud: &mut PointCloud3D<A>) {
        let m = self.matrix();
        for point in &mut cloud.points {
            let [x, y, z] = Self::apply_matrix(&m, point.position());
            point.x = x;
            point.y = y;
            point.z = z;
        }
    }

    #[inline]
    fn apply_matrix(m: &[[f64; 4]; 4], p: [f64; 3]) -> [f64; 3] {
        let [x, y, z] = p;
        [
            m[0][0] * x + m[0][1] * y + m[0][2] * z + m[0][3],
            m[1][0] * x + m[1][1] * y + m[1][2] * z + m[1][3],
            m[2][0] * x + m[2][1] * y + m[2][2] * z + m[2][3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point3D, Rgb};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = RigidTransform::identity();
        assert_eq!(t.apply([1.0, -2.0, 3.0]), [1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_pure_translation() {
        let t = RigidTransform::new([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.apply([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let t = RigidTransform::from_yaw([0.0, 0.0, 0.0], FRAC_PI_2);
        let p = t.apply([1.0, 0.0, 0.5]);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_last_row() {
        let m = RigidTransform::from_yaw([1.0, 1.0, 1.0], 0.3).matrix();
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_apply_to_cloud_keeps_colors() {
        let color = Rgb::new(0.1, 0.2, 0.3);
        let mut cloud = PointCloud3D::from_points(vec![Point3D::new(1.0, 0.0, 0.0, color)]);
        RigidTransform::from_yaw([0.0, 0.0, 2.0], FRAC_PI_2).apply_to_cloud(&mut cloud);

        let p = cloud.points[0];
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-12);
        assert_eq!(p.attr, color);
    }
}
