//! RGB-D camera inputs.
//!
//! Images are row-major: pixel `(u, v)` lives at index `v * width + u`,
//! with `u` the column and `v` the row.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Pinhole camera intrinsics in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length along u.
    pub fx: f64,
    /// Focal length along v.
    pub fy: f64,
    /// Principal point column.
    pub cx: f64,
    /// Principal point row.
    pub cy: f64,
}

impl Default for CameraIntrinsics {
    /// Simulated 640x360 RGB-D camera.
    fn default() -> Self {
        Self {
            fx: 205.47,
            fy: 205.47,
            cx: 320.5,
            cy: 180.5,
        }
    }
}

impl CameraIntrinsics {
    /// Check that both focal lengths are positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, f) in [("fx", self.fx), ("fy", self.fy)] {
            if !(f.is_finite() && f > 0.0) {
                return Err(MapError::InvalidParameter(format!(
                    "{name} must be positive, got {f}"
                )));
            }
        }
        if !(self.cx.is_finite() && self.cy.is_finite()) {
            return Err(MapError::InvalidParameter(
                "principal point must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Back-project pixel `(u, v)` at depth `z` into the camera frame.
    #[inline]
    pub fn back_project(&self, u: usize, v: usize, z: f64) -> [f64; 3] {
        [
            (u as f64 - self.cx) * z / self.fx,
            (v as f64 - self.cy) * z / self.fy,
            z,
        ]
    }
}

/// Depth image in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthImage {
    width: usize,
    height: usize,
    depths: Vec<f32>,
}

impl DepthImage {
    /// Wrap row-major depths. Fails if the length is not `width * height`.
    pub fn new(width: usize, height: usize, depths: Vec<f32>) -> Result<Self> {
        if depths.len() != width * height {
            return Err(MapError::InvalidParameter(format!(
                "depth buffer has {} values, expected {}x{}",
                depths.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            depths,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Depth at `(u, v)`, None outside the image.
    pub fn get(&self, u: usize, v: usize) -> Option<f32> {
        (u < self.width && v < self.height).then(|| self.depths[v * self.width + u])
    }

    /// Row-major depths.
    pub fn depths(&self) -> &[f32] {
        &self.depths
    }
}

/// Per-pixel segmentation class ids.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelImage {
    width: usize,
    height: usize,
    labels: Vec<Option<u8>>,
}

impl LabelImage {
    /// Image with every pixel unlabeled.
    pub fn unlabeled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![None; width * height],
        }
    }

    /// Combine binary instance masks in order.
    ///
    /// Each mask is a row-major `width * height` boolean buffer paired with
    /// its class id. A pixel covered by several masks takes the class of
    /// the last one.
    pub fn from_masks<M>(width: usize, height: usize, masks: &[(M, u8)]) -> Result<Self>
    where
        M: AsRef<[bool]>,
    {
        let mut image = Self::unlabeled(width, height);
        for (i, (mask, class_id)) in masks.iter().enumerate() {
            let mask = mask.as_ref();
            if mask.len() != image.labels.len() {
                return Err(MapError::InvalidParameter(format!(
                    "mask {i} has {} pixels, expected {}x{}",
                    mask.len(),
                    width,
                    height
                )));
            }
            for (label, _) in image.labels.iter_mut().zip(mask).filter(|(_, hit)| **hit) {
                *label = Some(*class_id);
            }
        }
        Ok(image)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Class at `(u, v)`, None when unlabeled or outside the image.
    pub fn get(&self, u: usize, v: usize) -> Option<u8> {
        if u < self.width && v < self.height {
            self.labels[v * self.width + u]
        } else {
            None
        }
    }

    /// Number of labeled pixels.
    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }
}
