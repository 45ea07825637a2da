//! Export of the core's outputs.
//!
//! Everything here consumes finished clouds and grids; the stitching and
//! gridding code never calls into this module.
//!
//! - **Wire records**: packed little-endian point records for publishing
//!   fused clouds and decoding incoming batches
//! - **PGM export**: 8-bit images of quadrant grids
//! - **SVG export**: scatter plots of traversability point sets
//!
//! ## Publishing a Fused Cloud
//!
//! ```rust,ignore
//! use bhumi_map::io::{encode_cloud, PointLayout};
//!
//! let cloud = fuser.fuse(&batch)?;
//! let fields = PointLayout::XyzRgb.fields();
//! publisher.send(fields, encode_cloud(cloud));
//! ```
//!
//! ## Grid Images
//!
//! ```rust,ignore
//! use bhumi_map::io::export_pgm;
//! use bhumi_map::traversability::Quadrant;
//!
//! export_pgm(grids.get(Quadrant::Q1), Path::new("q1.pgm"))?;
//! ```

pub mod cloud_format;
pub mod pgm;
pub mod svg;

pub use cloud_format::{
    CloudFormatError, PointField, PointLayout, WireAttribute, decode_cloud,
    decode_cloud_with_fields, encode_cloud,
};
pub use pgm::{export_pgm, grid_to_pixels, write_pgm};
pub use svg::{ScatterPlot, SvgConfig, value_color};
