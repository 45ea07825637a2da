//! Sensor front end: segmented RGB-D frames to colored point batches.
//!
//! The segmentation model itself runs elsewhere; this module receives its
//! binary masks and class ids together with the matching depth image and
//! produces the batches that [`crate::stitching::MapFuser`] consumes.

mod camera;
mod projector;

pub use camera::{CameraIntrinsics, DepthImage, LabelImage};
pub use projector::{DepthProjector, DepthProjectorConfig};
