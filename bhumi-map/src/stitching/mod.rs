//! Incremental point cloud stitching.
//!
//! - [`MapFuser`]: Reference-filtered fusion (segmented clouds against a
//!   SLAM map)
//! - [`CloudAccumulator`]: Plain append-and-downsample accumulation
//!   (terrain maps without a reference)
//!
//! Both own their global cloud exclusively and hand out shared references
//! after each update. Calls must be serialized by the caller; a reference
//! update never overlaps a fuse.

mod accumulator;
mod fuser;

pub use accumulator::CloudAccumulator;
pub use fuser::{FuseReport, FuserState, MapFuser, MapFuserConfig};
