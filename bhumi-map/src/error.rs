//! Error types for bhumi-map.
//!
//! Every error is local to one batch. After returning an error a component
//! is back in the state it had before the call and ready for the next batch.

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;

/// Map building errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// No points to index or process
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Stitching requested before a reference map was set
    #[error("Reference map not received yet")]
    NotReady,

    /// Bounding box has zero extent on at least one axis
    #[error("Degenerate geometry: extent {width:.3} x {height:.3}")]
    DegenerateGeometry {
        /// Extent along X in meters
        width: f64,
        /// Extent along Y in meters
        height: f64,
    },

    /// Invalid configuration value or input shape
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
