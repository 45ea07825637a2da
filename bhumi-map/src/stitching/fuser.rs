//! Reference-filtered map fusion.
//!
//! Incoming batches are noisy; a trusted reference surface (for example a
//! LIO-SAM global map) decides which points are kept.
//!
//! # Pipeline
//!
//! ```text
//!            set_reference()
//!                  │
//!                  ▼
//! ┌─────────┐  ┌───────────────────┐
//! │ Unready │─►│       Ready       │
//! └─────────┘  └─────────┬─────────┘
//!   fuse() →             │ fuse(batch)
//!   NotReady             ▼
//!              ┌───────────────────┐
//!              │ Nearest reference │  keep iff distance < threshold
//!              └─────────┬─────────┘
//!                        ▼
//!              ┌───────────────────┐
//!              │ Append + voxelize │  CloudAccumulator
//!              └─────────┬─────────┘
//!                        ▼
//!                   GlobalCloud
//! ```

use crate::core::{Attribute, PointCloud3D, Rgb};
use crate::error::{MapError, Result};
use crate::filters::VoxelDownsamplerConfig;
use crate::spatial::SpatialIndex3D;

use super::accumulator::CloudAccumulator;

/// Configuration for the map fuser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapFuserConfig {
    /// Voxel edge for downsampling the global cloud (meters).
    ///
    /// Default: 0.5
    pub voxel_size: f64,

    /// Acceptance radius around the reference surface (meters).
    ///
    /// Points at exactly this distance are rejected.
    /// Default: 0.5
    pub distance_threshold: f64,
}

impl Default for MapFuserConfig {
    fn default() -> Self {
        Self {
            voxel_size: 0.5,
            distance_threshold: 0.5,
        }
    }
}

impl MapFuserConfig {
    /// Check voxel size and threshold.
    pub fn validate(&self) -> Result<()> {
        self.voxel_config().validate()?;
        validate_threshold(self.distance_threshold)
    }

    fn voxel_config(&self) -> VoxelDownsamplerConfig {
        VoxelDownsamplerConfig {
            voxel_size: self.voxel_size,
        }
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(MapError::InvalidParameter(format!(
            "distance_threshold must be non-negative, got {}",
            threshold
        )))
    }
}

/// Whether a reference surface is available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuserState {
    /// No reference yet; batches are rejected
    Unready,
    /// Reference index present
    Ready,
}

/// Outcome of the last successful fuse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuseReport {
    /// Points in the incoming batch
    pub input_points: usize,
    /// Points within the threshold of the reference
    pub accepted: usize,
    /// Points rejected by the reference filter
    pub rejected: usize,
    /// Global cloud size after downsampling
    pub cloud_size: usize,
}

/// Owns the reference index and the global cloud.
///
/// This is the only mutator of the global cloud. Callers get shared
/// references to it after each fuse.
///
/// # Example
///
/// ```rust
/// use bhumi_map::core::{Point3D, PointCloud3D, Rgb};
/// use bhumi_map::stitching::{MapFuser, MapFuserConfig};
///
/// let mut fuser = MapFuser::<Rgb>::new(MapFuserConfig::default()).unwrap();
/// fuser
///     .set_reference(&PointCloud3D::from_points(vec![Point3D::at(0.0, 0.0, 0.0)]))
///     .unwrap();
///
/// let red = Rgb::new(1.0, 0.0, 0.0);
/// let batch = PointCloud3D::from_points(vec![
///     Point3D::new(0.0, 0.0, 0.3, red),
///     Point3D::new(0.0, 0.0, 1.0, red),
/// ]);
/// let cloud = fuser.fuse(&batch).unwrap();
/// assert_eq!(cloud.len(), 1);
/// ```
#[derive(Clone)]
pub struct MapFuser<A: Attribute = Rgb> {
    config: MapFuserConfig,
    reference: Option<SpatialIndex3D>,
    accumulator: CloudAccumulator<A>,
    last_report: Option<FuseReport>,
}

impl<A: Attribute> MapFuser<A> {
    /// Create a fuser in the Unready state.
    pub fn new(config: MapFuserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            reference: None,
            accumulator: CloudAccumulator::new(config.voxel_config())?,
            last_report: None,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &MapFuserConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> FuserState {
        if self.reference.is_some() {
            FuserState::Ready
        } else {
            FuserState::Unready
        }
    }

    /// Number of points in the reference index (0 while Unready).
    pub fn reference_len(&self) -> usize {
        self.reference.as_ref().map_or(0, SpatialIndex3D::len)
    }

    /// Global cloud, None until the first successful fuse.
    pub fn cloud(&self) -> Option<&PointCloud3D<A>> {
        self.accumulator.cloud()
    }

    /// Report of the last successful fuse.
    pub fn last_report(&self) -> Option<&FuseReport> {
        self.last_report.as_ref()
    }

    /// Replace the reference surface and rebuild its index.
    ///
    /// Only positions are used; the reference payload is ignored.
    ///
    /// # Errors
    /// [`MapError::EmptyInput`] if the reference is empty. The previous
    /// state (and reference, if any) is kept.
    pub fn set_reference<R>(&mut self, reference: &PointCloud3D<R>) -> Result<()> {
        let index = SpatialIndex3D::from_cloud(reference)?;
        log::info!("Reference map updated: {} points", index.len());
        self.reference = Some(index);
        Ok(())
    }

    /// Keep the points of `batch` strictly closer than `threshold` to the
    /// reference surface. Points with a NaN or infinite coordinate are
    /// rejected.
    pub fn filter_batch(&self, batch: &PointCloud3D<A>, threshold: f64) -> Result<PointCloud3D<A>> {
        validate_threshold(threshold)?;
        let reference = self.reference.as_ref().ok_or(MapError::NotReady)?;

        Ok(batch.filtered(|p| {
            p.is_finite()
                && reference
                    .query_nearest(&p.position())
                    .is_some_and(|n| n.distance < threshold)
        }))
    }

    /// Fuse a batch using the configured distance threshold.
    pub fn fuse(&mut self, batch: &PointCloud3D<A>) -> Result<&PointCloud3D<A>> {
        self.fuse_with_threshold(batch, self.config.distance_threshold)
    }

    /// Fuse a batch into the global cloud.
    ///
    /// 1. Keep batch points with reference distance `< threshold`
    /// 2. Append survivors to the global cloud
    /// 3. Voxel-downsample the combined cloud
    ///
    /// # Errors
    /// - [`MapError::NotReady`] while no reference is set; the batch is
    ///   dropped and nothing changes
    /// - [`MapError::InvalidParameter`] for a negative or non-finite threshold
    pub fn fuse_with_threshold(
        &mut self,
        batch: &PointCloud3D<A>,
        threshold: f64,
    ) -> Result<&PointCloud3D<A>> {
        if self.reference.is_none() {
            log::warn!(
                "Reference map not received yet, dropping batch of {} points",
                batch.len()
            );
            return Err(MapError::NotReady);
        }

        let survivors = self.filter_batch(batch, threshold)?;
        let report = FuseReport {
            input_points: batch.len(),
            accepted: survivors.len(),
            rejected: batch.len() - survivors.len(),
            cloud_size: 0,
        };

        let cloud = self.accumulator.integrate(&survivors);
        log::debug!(
            "Fused batch: {} accepted, {} rejected, global cloud {} points",
            report.accepted,
            report.rejected,
            cloud.len()
        );

        self.last_report = Some(FuseReport {
            cloud_size: cloud.len(),
            ..report
        });
        Ok(cloud)
    }

    /// Drop the global cloud, keeping the reference.
    pub fn clear_cloud(&mut self) {
        self.accumulator.clear();
        self.last_report = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point3D;

    fn red(x: f64, y: f64, z: f64) -> Point3D<Rgb> {
        Point3D::new(x, y, z, Rgb::new(1.0, 0.0, 0.0))
    }

    fn origin_reference() -> PointCloud3D<()> {
        PointCloud3D::from_points(vec![Point3D::at(0.0, 0.0, 0.0)])
    }

    fn ready_fuser() -> MapFuser {
        let mut fuser = MapFuser::new(MapFuserConfig::default()).unwrap();
        fuser.set_reference(&origin_reference()).unwrap();
        fuser
    }

    #[test]
    fn test_invalid_config() {
        let config = MapFuserConfig {
            distance_threshold: -0.1,
            ..Default::default()
        };
        assert!(MapFuser::<Rgb>::new(config).is_err());

        let config = MapFuserConfig {
            voxel_size: 0.0,
            ..Default::default()
        };
        assert!(MapFuser::<Rgb>::new(config).is_err());
    }

    #[test]
    fn test_starts_unready() {
        let fuser = MapFuser::<Rgb>::new(MapFuserConfig::default()).unwrap();
        assert_eq!(fuser.state(), FuserState::Unready);
        assert_eq!(fuser.reference_len(), 0);
        assert!(fuser.cloud().is_none());
    }

    #[test]
    fn test_fuse_unready_rejected() {
        let mut fuser = MapFuser::<Rgb>::new(MapFuserConfig::default()).unwrap();
        let batch = PointCloud3D::from_points(vec![red(0.0, 0.0, 0.0)]);

        assert_eq!(fuser.fuse(&batch).unwrap_err(), MapError::NotReady);
        assert!(fuser.cloud().is_none());
        assert!(fuser.last_report().is_none());
    }

    #[test]
    fn test_empty_reference_stays_unready() {
        let mut fuser = MapFuser::<Rgb>::new(MapFuserConfig::default()).unwrap();
        let result = fuser.set_reference(&PointCloud3D::<()>::new());
        assert!(matches!(result, Err(MapError::EmptyInput(_))));
        assert_eq!(fuser.state(), FuserState::Unready);
    }

    #[test]
    fn test_empty_reference_keeps_previous() {
        let mut fuser = ready_fuser();
        assert!(fuser.set_reference(&PointCloud3D::<()>::new()).is_err());
        assert_eq!(fuser.state(), FuserState::Ready);
        assert_eq!(fuser.reference_len(), 1);
    }

    #[test]
    fn test_scenario_survivors() {
        let mut fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![red(0.0, 0.0, 0.3), red(0.0, 0.0, 1.0)]);

        let cloud = fuser.fuse(&batch).unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.points[0].z, 0.3);

        let report = fuser.last_report().unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.cloud_size, 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![red(0.0, 0.0, 0.5), red(0.0, 0.0, 0.5 - 1e-9)]);

        let kept = fuser.filter_batch(&batch, 0.5).unwrap();
        assert_eq!(kept.len(), 1);
        assert!(kept.points[0].z < 0.5);
    }

    #[test]
    fn test_fuse_threshold_boundary() {
        let mut fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![red(0.0, 0.0, 0.5), red(0.0, 0.0, 0.5 - 1e-9)]);

        let cloud = fuser.fuse(&batch).unwrap();
        assert_eq!(cloud.len(), 1);
        assert!(cloud.points[0].z < 0.5);
        assert_eq!(fuser.last_report().unwrap().rejected, 1);
    }

    #[test]
    fn test_fuse_rejects_non_finite_points() {
        let mut reference = PointCloud3D::new();
        for i in 0..50 {
            reference.push(Point3D::at(i as f64 * 0.1, 0.0, 0.0));
        }
        let mut fuser = MapFuser::new(MapFuserConfig::default()).unwrap();
        fuser.set_reference(&reference).unwrap();

        let batch = PointCloud3D::from_points(vec![
            red(f64::NAN, 0.0, 0.0),
            red(0.0, f64::INFINITY, 0.0),
            red(0.0, 0.0, f64::NEG_INFINITY),
            red(0.0, 0.0, 0.1),
        ]);
        let cloud = fuser.fuse(&batch).unwrap();
        assert_eq!(cloud.len(), 1);
        assert!(cloud.points[0].is_finite());

        let report = fuser.last_report().unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected, 3);
    }

    #[test]
    fn test_zero_threshold_rejects_everything() {
        let fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![red(0.0, 0.0, 0.0)]);
        assert!(fuser.filter_batch(&batch, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_color_not_in_distance() {
        let fuser = ready_fuser();
        let far_color = Point3D::new(0.0, 0.0, 0.1, Rgb::new(100.0, 100.0, 100.0));
        let batch = PointCloud3D::from_points(vec![far_color]);
        assert_eq!(fuser.filter_batch(&batch, 0.5).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_batch_noop() {
        let mut fuser = ready_fuser();
        fuser
            .fuse(&PointCloud3D::from_points(vec![red(0.1, 0.0, 0.0)]))
            .unwrap();
        let before = fuser.cloud().cloned();

        let cloud = fuser.fuse(&PointCloud3D::new()).unwrap();
        assert_eq!(Some(cloud.clone()), before);
    }

    #[test]
    fn test_all_filtered_initializes_empty_cloud() {
        let mut fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![red(5.0, 5.0, 5.0)]);
        let cloud = fuser.fuse(&batch).unwrap();
        assert!(cloud.is_empty());
        assert!(fuser.cloud().is_some());
    }

    #[test]
    fn test_fuse_downsamples() {
        let mut fuser = ready_fuser();
        let batch = PointCloud3D::from_points(vec![
            red(0.05, 0.05, 0.05),
            red(0.1, 0.1, 0.1),
            red(0.15, 0.15, 0.15),
        ]);
        assert_eq!(fuser.fuse(&batch).unwrap().len(), 1);
    }

    #[test]
    fn test_clear_cloud_keeps_reference() {
        let mut fuser = ready_fuser();
        fuser
            .fuse(&PointCloud3D::from_points(vec![red(0.1, 0.0, 0.0)]))
            .unwrap();
        fuser.clear_cloud();
        assert!(fuser.cloud().is_none());
        assert_eq!(fuser.state(), FuserState::Ready);
    }

    #[test]
    fn test_intensity_payload() {
        let mut fuser = MapFuser::<f64>::new(MapFuserConfig::default()).unwrap();
        fuser.set_reference(&origin_reference()).unwrap();
        let batch = PointCloud3D::from_points(vec![Point3D::new(0.1, 0.0, 0.0, 0.8)]);
        assert_eq!(fuser.fuse(&batch).unwrap().points[0].attr, 0.8);
    }
}
