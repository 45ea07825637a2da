//! Segmented depth image to colored point cloud.
//!
//! ```text
//! depth + labels ──► back-project labeled pixels ──► color by class
//!                ──► voxel downsample ──► camera → map transform
//! ```

use crate::core::{PointCloud3D, Point3D, RigidTransform, Rgb, class_color};
use crate::error::{MapError, Result};
use crate::filters::{VoxelDownsampler, VoxelDownsamplerConfig};

use super::camera::{CameraIntrinsics, DepthImage, LabelImage};

/// Configuration for [`DepthProjector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthProjectorConfig {
    /// Camera intrinsics.
    pub intrinsics: CameraIntrinsics,

    /// Voxel edge applied to each projected frame.
    ///
    /// Default: 0.35
    pub voxel_size: f64,
}

impl Default for DepthProjectorConfig {
    fn default() -> Self {
        Self {
            intrinsics: CameraIntrinsics::default(),
            voxel_size: 0.35,
        }
    }
}

impl DepthProjectorConfig {
    /// Validate intrinsics and voxel size.
    pub fn validate(&self) -> Result<()> {
        self.intrinsics.validate()?;
        VoxelDownsamplerConfig {
            voxel_size: self.voxel_size,
        }
        .validate()
    }
}

/// Projects segmented depth frames into colored map-frame clouds.
#[derive(Clone, Debug)]
pub struct DepthProjector {
    config: DepthProjectorConfig,
    downsampler: VoxelDownsampler,
}

impl DepthProjector {
    /// Create a projector after validating the configuration.
    pub fn new(config: DepthProjectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            downsampler: VoxelDownsampler::with_voxel_size(config.voxel_size)?,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DepthProjectorConfig {
        &self.config
    }

    /// Project every labeled pixel with a positive finite depth.
    ///
    /// Points are colored by class, downsampled, then moved into the map
    /// frame by `camera_to_map`. Without a pose the cloud stays in the
    /// camera frame.
    pub fn project(
        &self,
        depth: &DepthImage,
        labels: &LabelImage,
        camera_to_map: Option<&RigidTransform>,
    ) -> Result<PointCloud3D<Rgb>> {
        if (depth.width(), depth.height()) != (labels.width(), labels.height()) {
            return Err(MapError::InvalidParameter(format!(
                "depth is {}x{} but labels are {}x{}",
                depth.width(),
                depth.height(),
                labels.width(),
                labels.height()
            )));
        }

        let k = &self.config.intrinsics;
        let mut cloud = PointCloud3D::with_capacity(labels.labeled_count());
        for v in 0..depth.height() {
            for u in 0..depth.width() {
                let Some(class_id) = labels.get(u, v) else {
                    continue;
                };
                let z = depth.get(u, v).map_or(f64::NAN, f64::from);
                if !(z.is_finite() && z > 0.0) {
                    continue;
                }
                let [x, y, z] = k.back_project(u, v, z);
                cloud.push(Point3D::new(x, y, z, class_color(class_id)));
            }
        }

        let mut cloud = self.downsampler.apply(&cloud);
        match camera_to_map {
            Some(transform) => transform.apply_to_cloud(&mut cloud),
            None => log::warn!(
                "No camera pose for frame; keeping {} points in camera frame",
                cloud.len()
            ),
        }
        Ok(cloud)
    }
}
