//! Camera configuration section.

use serde::{Deserialize, Serialize};

use crate::sensors::{CameraIntrinsics, DepthProjectorConfig};

use super::defaults;

/// Camera configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSection {
    /// Focal length along u (pixels)
    #[serde(default = "defaults::focal_length")]
    pub fx: f64,

    /// Focal length along v (pixels)
    #[serde(default = "defaults::focal_length")]
    pub fy: f64,

    /// Principal point column (pixels)
    #[serde(default = "defaults::principal_x")]
    pub cx: f64,

    /// Principal point row (pixels)
    #[serde(default = "defaults::principal_y")]
    pub cy: f64,

    /// Per-frame voxel edge (meters)
    #[serde(default = "defaults::camera_voxel_size")]
    pub voxel_size: f64,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            fx: defaults::focal_length(),
            fy: defaults::focal_length(),
            cx: defaults::principal_x(),
            cy: defaults::principal_y(),
            voxel_size: defaults::camera_voxel_size(),
        }
    }
}

impl CameraSection {
    /// Convert to DepthProjectorConfig
    pub fn to_projector_config(&self) -> DepthProjectorConfig {
        DepthProjectorConfig {
            intrinsics: CameraIntrinsics {
                fx: self.fx,
                fy: self.fy,
                cx: self.cx,
                cy: self.cy,
            },
            voxel_size: self.voxel_size,
        }
    }
}
