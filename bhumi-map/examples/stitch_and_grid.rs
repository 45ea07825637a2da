//! End-to-end demo: project segmented frames, stitch them against a
//! reference map, then grid the result for a planner.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example stitch_and_grid -- [config.yaml] [output_dir]
//! ```
//!
//! Writes `scatter.svg` and one PGM per quadrant to the output directory
//! (default `output/`).

use std::path::{Path, PathBuf};

use bhumi_map::io::{PointLayout, ScatterPlot, SvgConfig, encode_cloud, export_pgm};
use bhumi_map::{
    BhumiConfig, CloudAccumulator, DepthImage, DepthProjector, LabelImage, MapError, MapFuser,
    Point2D, Point3D, PointCloud3D, QuadrantGridBuilder, RigidTransform, Rgb, TerrainClass,
};

const WIDTH: usize = 64;
const HEIGHT: usize = 36;

/// Synthetic frame: a sidewalk strip on the lower half, grass elsewhere.
fn synthetic_frame() -> Result<(DepthImage, LabelImage), MapError> {
    let mut depths = Vec::with_capacity(WIDTH * HEIGHT);
    let mut sidewalk = vec![false; WIDTH * HEIGHT];
    let mut grass = vec![false; WIDTH * HEIGHT];
    for v in 0..HEIGHT {
        for u in 0..WIDTH {
            // Closer rows at the bottom of the image
            depths.push(2.0 + (HEIGHT - v) as f32 * 0.1);
            let i = v * WIDTH + u;
            if v > HEIGHT / 2 && (20..44).contains(&u) {
                sidewalk[i] = true;
            } else if v > HEIGHT / 3 {
                grass[i] = true;
            }
        }
    }
    let depth = DepthImage::new(WIDTH, HEIGHT, depths)?;
    let labels = LabelImage::from_masks(
        WIDTH,
        HEIGHT,
        &[
            (grass, TerrainClass::Grass.id()),
            (sidewalk, TerrainClass::Sidewalk.id()),
        ],
    )?;
    Ok((depth, labels))
}

/// Traversability value per class, 1.0 for easy ground.
fn traversability(color: &Rgb) -> f64 {
    match TerrainClass::from_color(color) {
        TerrainClass::Sidewalk | TerrainClass::ParkingLot => 1.0,
        TerrainClass::Gravel => 0.7,
        TerrainClass::Grass | TerrainClass::Mulch => 0.5,
        TerrainClass::Vegetation | TerrainClass::Unused => 0.2,
        TerrainClass::Obstacle => 0.0,
    }
}

fn run(config: &BhumiConfig, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let projector = DepthProjector::new(config.to_projector_config())?;
    let mut fuser: MapFuser<Rgb> = MapFuser::new(config.to_fuser_config())?;
    let mut terrain: CloudAccumulator<f64> = CloudAccumulator::new(config.to_terrain_config())?;

    let (depth, labels) = synthetic_frame()?;

    // The first frame arrives before the SLAM map and is dropped
    let first = projector.project(&depth, &labels, None)?;
    if let Err(e) = fuser.fuse(&first) {
        log::info!("Skipping frame: {}", e);
    }

    // Reference: the camera-frame projection of every pixel, as a SLAM map stand-in
    let reference: PointCloud3D<()> = first.iter().map(|p| Point3D::at(p.x, p.y, p.z)).collect();
    fuser.set_reference(&reference)?;

    for step in 0..5 {
        let pose = RigidTransform::from_yaw([0.0, 0.0, step as f64 * 0.05], 0.0);
        let batch = projector.project(&depth, &labels, Some(&pose))?;
        let cloud = fuser.fuse(&batch)?;

        let records = encode_cloud(cloud);
        log::info!(
            "Step {}: global cloud {} points, {} bytes ({} byte records)",
            step,
            cloud.len(),
            records.len(),
            PointLayout::XyzRgb.stride()
        );

        let intensity: PointCloud3D<f64> = batch
            .iter()
            .map(|p| Point3D::new(p.x, p.y, p.z, traversability(&p.attr)))
            .collect();
        terrain.integrate(&intensity);
    }

    // Camera frame: x right, z forward. Ground plane for the planner is (z, -x).
    let ground: Vec<Point2D> = terrain
        .cloud()
        .map(|cloud| {
            cloud
                .iter()
                .map(|p| Point2D::new(p.z, -p.x, p.attr))
                .collect()
        })
        .unwrap_or_default();

    let builder = QuadrantGridBuilder::new(config.to_grid_config())?;
    let grids = match builder.build_with_report(&ground) {
        Ok((grids, report)) => {
            log::info!(
                "Grids {}x{}, filled cells per quadrant {:?}",
                report.shape.0,
                report.shape.1,
                report.filled
            );
            grids
        }
        Err(e) => {
            log::warn!("{}; publishing fallback map", e);
            config.fallback_grids()
        }
    };

    std::fs::create_dir_all(output_dir)?;
    ScatterPlot::new(&ground, SvgConfig::default())
        .with_title("Traversability Map")
        .save(&output_dir.join("scatter.svg"))?;
    for (quadrant, grid) in grids.iter() {
        let name = format!("{:?}.pgm", quadrant).to_lowercase();
        export_pgm(grid, &output_dir.join(name))?;
    }
    log::info!("Wrote outputs to {}", output_dir.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => BhumiConfig::load(Path::new(&path)),
        None => BhumiConfig::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| "output".into());

    if let Err(e) = run(&config, &output_dir) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
