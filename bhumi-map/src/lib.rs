//! # BhumiMap
//!
//! Point cloud stitching and traversability gridding for ground robots.
//!
//! ## Overview
//!
//! BhumiMap covers the two spatial steps between a perception stack and a
//! path planner:
//!
//! - **Stitching**: fuse segmented point batches into one global cloud,
//!   dropping points that stray from a trusted reference map (e.g. from
//!   SLAM) and voxel-downsampling the result
//! - **Traversability gridding**: rasterize a sparse set of classified
//!   ground points into four dense quadrant grids of averaged values
//!
//! ## Data Flow
//!
//! ```text
//!  depth + masks ──► DepthProjector ──► batch ─┐
//!                                              ▼
//!  reference map ──► MapFuser::set_reference   MapFuser::fuse ──► GlobalCloud
//!                                              │
//!                         (reference filter ► append ► VoxelDownsampler)
//!
//!  ground points ──► QuadrantGridBuilder::build ──► {Q1, Q2, Q3, Q4} Grids ──► planner
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhumi_map::{MapFuser, MapFuserConfig, QuadrantGridBuilder, GridBuilderConfig};
//!
//! let mut fuser = MapFuser::new(MapFuserConfig::default())?;
//! fuser.set_reference(&slam_map)?;
//! let cloud = fuser.fuse(&batch)?;
//!
//! let builder = QuadrantGridBuilder::new(GridBuilderConfig::default())?;
//! let grids = builder.build(&ground_points)?;
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward
//! - Y: Left
//! - Z: Up
//!
//! Camera-frame clouds (before a pose is applied) use the optical
//! convention: X right, Y down, Z forward.

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Unified configuration
pub mod config;

// Spatial indexing
pub mod spatial;

// Voxel downsampling
pub mod filters;

// Reference-filtered fusion
pub mod stitching;

// Quadrant grid rasterization
pub mod traversability;

// RGB-D back-projection
pub mod sensors;

// Export (wire records, PGM, SVG)
pub mod io;

// Re-export commonly used types
pub use core::{
    Attribute, Bounds2D, Bounds3D, Point2D, Point3D, PointCloud3D, Rgb, RigidTransform,
    TerrainClass,
};

pub use config::{BhumiConfig, ConfigLoadError};

pub use error::{MapError, Result};

pub use filters::{VoxelDownsampler, VoxelDownsamplerConfig, downsample};

pub use spatial::{Neighbor, SpatialIndex, SpatialIndex2D, SpatialIndex3D};

pub use stitching::{CloudAccumulator, FuseReport, FuserState, MapFuser, MapFuserConfig};

pub use traversability::{
    Grid, GridBuildReport, GridBuilderConfig, Quadrant, QuadrantGridBuilder, QuadrantGrids,
    ValueScale,
};

pub use sensors::{CameraIntrinsics, DepthImage, DepthProjector, DepthProjectorConfig, LabelImage};
