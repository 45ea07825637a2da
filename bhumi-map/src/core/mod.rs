//! Core types for the bhumi-map library.
//!
//! Coordinates follow the ROS REP-103 convention (X forward, Y left, Z up)
//! and are in meters.
//!
//! ## Type Categories
//!
//! ### Points
//! - [`Point3D`]: 3D position with an attribute payload (color or intensity)
//! - [`Point2D`]: Ground-plane position with a traversability value
//! - [`Attribute`]: Payloads that can be averaged during downsampling
//! - [`Rgb`]: Color triple in [0, 1]
//!
//! ### Collections
//! - [`PointCloud3D`]: Ordered point collection
//! - [`Bounds3D`], [`Bounds2D`]: Axis-aligned bounding boxes
//!
//! ### Frames and Semantics
//! - [`RigidTransform`]: Camera to map frame transform
//! - [`TerrainClass`]: Segmentation classes and their palette

mod bounds;
mod cloud;
mod point;
mod terrain;
mod transform;

pub use bounds::{Bounds2D, Bounds3D};
pub use cloud::PointCloud3D;
pub use point::{Attribute, Point2D, Point3D, Rgb};
pub use terrain::{TerrainClass, class_color, unknown_class_color};
pub use transform::RigidTransform;
