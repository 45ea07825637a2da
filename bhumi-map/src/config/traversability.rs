//! Traversability gridding configuration section.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::traversability::{GridBuilderConfig, QuadrantGrids, ValueScale};

use super::defaults;

/// Traversability configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraversabilitySection {
    /// Cells per meter
    #[serde(default = "defaults::resolution")]
    pub resolution: u32,

    /// Rescale cell means into [0, 1]
    #[serde(default)]
    pub normalize: bool,

    /// Value of cells no point reaches
    #[serde(default)]
    pub default_value: f64,

    /// Value of every cell in the fallback map
    #[serde(default = "defaults::fallback_value")]
    pub fallback_value: f64,

    /// Fallback map rows
    #[serde(default = "defaults::fallback_cells")]
    pub fallback_rows: usize,

    /// Fallback map columns
    #[serde(default = "defaults::fallback_cells")]
    pub fallback_cols: usize,
}

impl Default for TraversabilitySection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
            normalize: false,
            default_value: 0.0,
            fallback_value: defaults::fallback_value(),
            fallback_rows: defaults::fallback_cells(),
            fallback_cols: defaults::fallback_cells(),
        }
    }
}

impl TraversabilitySection {
    /// Convert to GridBuilderConfig
    pub fn to_grid_config(&self) -> GridBuilderConfig {
        GridBuilderConfig {
            resolution: self.resolution,
            scale: if self.normalize {
                ValueScale::Normalized
            } else {
                ValueScale::Raw
            },
            default_value: self.default_value,
        }
    }

    /// Uniform map handed to the planner when a batch yields no grid
    pub fn fallback_grids(&self) -> QuadrantGrids {
        QuadrantGrids::fallback(
            self.fallback_rows,
            self.fallback_cols,
            self.fallback_value,
            self.resolution,
        )
    }

    /// Check fallback shape and value
    pub fn validate_fallback(&self) -> Result<()> {
        if self.fallback_rows == 0 || self.fallback_cols == 0 {
            return Err(MapError::InvalidParameter(format!(
                "fallback map must be at least 1x1, got {}x{}",
                self.fallback_rows, self.fallback_cols
            )));
        }
        if !self.fallback_value.is_finite() {
            return Err(MapError::InvalidParameter(
                "fallback_value must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
