//! Unfiltered cloud accumulation.
//!
//! Appends every incoming batch to a global cloud and voxel-downsamples
//! the result to bound memory growth. Used directly for terrain maps and
//! as the storage stage of [`super::MapFuser`].

use crate::core::{Attribute, PointCloud3D};
use crate::error::Result;
use crate::filters::{VoxelDownsampler, VoxelDownsamplerConfig};

/// Growing, downsampled point accumulation.
#[derive(Debug, Clone)]
pub struct CloudAccumulator<A> {
    downsampler: VoxelDownsampler,
    cloud: Option<PointCloud3D<A>>,
}

impl<A: Attribute> CloudAccumulator<A> {
    /// Create an accumulator with the given voxel configuration.
    pub fn new(config: VoxelDownsamplerConfig) -> Result<Self> {
        Ok(Self {
            downsampler: VoxelDownsampler::new(config)?,
            cloud: None,
        })
    }

    /// Voxel edge used after every append.
    pub fn voxel_size(&self) -> f64 {
        self.downsampler.config().voxel_size
    }

    /// Current accumulation, None until the first integration.
    pub fn cloud(&self) -> Option<&PointCloud3D<A>> {
        self.cloud.as_ref()
    }

    /// Append a batch and downsample the combined cloud.
    ///
    /// An empty batch leaves an existing cloud untouched; the first
    /// integration always creates the cloud, even if empty.
    pub fn integrate(&mut self, batch: &PointCloud3D<A>) -> &PointCloud3D<A> {
        let cloud = self.cloud.get_or_insert_with(PointCloud3D::new);
        if !batch.is_empty() {
            cloud.extend_from(batch);
            *cloud = self.downsampler.apply(cloud);
        }
        cloud
    }

    /// Drop the accumulation.
    pub fn clear(&mut self) {
        self.cloud = None;
    }
}
