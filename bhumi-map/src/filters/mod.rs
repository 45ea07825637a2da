//! Point cloud filters.
//!
//! # Pipeline
//!
//! ```text
//! batch → reference distance filter → append → VoxelDownsampler → GlobalCloud
//! ```
//!
//! The distance filter lives in [`crate::stitching`]; this module holds the
//! stateless density reduction step.

mod voxel;

pub use voxel::{VoxelDownsampler, VoxelDownsamplerConfig, downsample};
