//! Stitching configuration section.

use serde::{Deserialize, Serialize};

use crate::filters::VoxelDownsamplerConfig;
use crate::stitching::MapFuserConfig;

use super::defaults;

/// Stitching configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StitchingSection {
    /// Voxel edge of the fused segmentation map (meters)
    #[serde(default = "defaults::voxel_size")]
    pub voxel_size: f64,

    /// Acceptance radius around the reference map (meters)
    #[serde(default = "defaults::distance_threshold")]
    pub distance_threshold: f64,

    /// Voxel edge of the unfiltered terrain map (meters)
    #[serde(default = "defaults::terrain_voxel_size")]
    pub terrain_voxel_size: f64,
}

impl Default for StitchingSection {
    fn default() -> Self {
        Self {
            voxel_size: defaults::voxel_size(),
            distance_threshold: defaults::distance_threshold(),
            terrain_voxel_size: defaults::terrain_voxel_size(),
        }
    }
}

impl StitchingSection {
    /// Convert to MapFuserConfig
    pub fn to_fuser_config(&self) -> MapFuserConfig {
        MapFuserConfig {
            voxel_size: self.voxel_size,
            distance_threshold: self.distance_threshold,
        }
    }

    /// Convert to the terrain accumulator's voxel config
    pub fn to_terrain_config(&self) -> VoxelDownsamplerConfig {
        VoxelDownsamplerConfig {
            voxel_size: self.terrain_voxel_size,
        }
    }
}
