//! Main BhumiConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filters::VoxelDownsamplerConfig;
use crate::sensors::DepthProjectorConfig;
use crate::stitching::MapFuserConfig;
use crate::traversability::{GridBuilderConfig, QuadrantGrids};

use super::camera::CameraSection;
use super::error::ConfigLoadError;
use super::stitching::StitchingSection;
use super::traversability::TraversabilitySection;

/// Full bhumi-map configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct BhumiConfig {
    /// Stitching settings
    #[serde(default)]
    pub stitching: StitchingSection,

    /// Traversability gridding settings
    #[serde(default)]
    pub traversability: TraversabilitySection,

    /// RGB-D camera settings
    #[serde(default)]
    pub camera: CameraSection,
}

impl BhumiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Check every section against its runtime config
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_fuser_config().validate()?;
        self.to_terrain_config().validate()?;
        self.to_grid_config().validate()?;
        self.to_projector_config().validate()?;
        self.traversability.validate_fallback()?;
        Ok(())
    }

    /// Convert to MapFuserConfig
    pub fn to_fuser_config(&self) -> MapFuserConfig {
        self.stitching.to_fuser_config()
    }

    /// Voxel config of the unfiltered terrain accumulator
    pub fn to_terrain_config(&self) -> VoxelDownsamplerConfig {
        self.stitching.to_terrain_config()
    }

    /// Convert to GridBuilderConfig
    pub fn to_grid_config(&self) -> GridBuilderConfig {
        self.traversability.to_grid_config()
    }

    /// Convert to DepthProjectorConfig
    pub fn to_projector_config(&self) -> DepthProjectorConfig {
        self.camera.to_projector_config()
    }

    /// Fallback map for batches that produce no grid
    pub fn fallback_grids(&self) -> QuadrantGrids {
        self.traversability.fallback_grids()
    }
}
