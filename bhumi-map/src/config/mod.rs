//! Unified configuration loading for bhumi-map.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhumi_map::config::BhumiConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = BhumiConfig::load_default()?;
//!
//! // Convert to runtime configs
//! let fuser = MapFuser::<Rgb>::new(config.to_fuser_config())?;
//! let builder = QuadrantGridBuilder::new(config.to_grid_config())?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`StitchingSection`] | Fusion voxel size, acceptance radius, terrain voxel size |
//! | [`TraversabilitySection`] | Grid resolution, normalization, fallback map |
//! | [`CameraSection`] | Pinhole intrinsics and per-frame voxel size |
//!
//! ## Example YAML
//!
//! ```yaml
//! stitching:
//!   voxel_size: 0.5           # fused map voxel edge (m)
//!   distance_threshold: 0.5   # max distance to reference map (m)
//!
//! traversability:
//!   resolution: 1             # cells per meter
//!   normalize: false
//!
//! camera:
//!   fx: 205.47
//!   fy: 205.47
//! ```

mod bhumi;
mod camera;
mod defaults;
mod error;
mod stitching;
mod traversability;

// Re-export main types
pub use bhumi::BhumiConfig;
pub use error::ConfigLoadError;

// Re-export section types
pub use camera::CameraSection;
pub use stitching::StitchingSection;
pub use traversability::TraversabilitySection;
