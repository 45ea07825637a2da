//! Spatial indexing over point snapshots.
//!
//! - [`SpatialIndex`]: R-tree backed nearest-neighbor and radius queries
//! - [`Neighbor`]: Nearest-neighbor query result

mod index;

pub use index::{IndexPoint, Neighbor, SpatialIndex, SpatialIndex2D, SpatialIndex3D};
