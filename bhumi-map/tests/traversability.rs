//! Traversability gridding integration tests.

mod common;

use approx::assert_relative_eq;
use bhumi_map::traversability::axis_cells;
use bhumi_map::{
    BhumiConfig, GridBuilderConfig, MapError, Point2D, Quadrant, QuadrantGridBuilder, ValueScale,
};
use common::{Lcg, ground_points};

fn builder(resolution: u32, scale: ValueScale) -> QuadrantGridBuilder {
    QuadrantGridBuilder::new(GridBuilderConfig {
        resolution,
        scale,
        default_value: 0.0,
    })
    .unwrap()
}

#[test]
fn test_two_point_scenario() {
    let points = [Point2D::new(0.0, 0.0, 0.0), Point2D::new(1.0, 1.0, 1.0)];
    let grids = builder(1, ValueScale::Raw).build(&points).unwrap();

    let q1 = grids.get(Quadrant::Q1);
    assert_eq!((q1.rows(), q1.cols()), (2, 2));
    assert_relative_eq!(q1.get(0, 0).unwrap(), 0.0);
    assert_relative_eq!(q1.get(1, 1).unwrap(), 1.0);
    assert_relative_eq!(q1.get(1, 0).unwrap(), 0.0);
}

#[test]
fn test_every_point_has_a_cell() {
    let mut rng = Lcg::new(17);
    let points = ground_points(&mut rng, 400, 6.5);

    for resolution in [1, 2, 4] {
        let grids = builder(resolution, ValueScale::Raw).build(&points).unwrap();
        for p in &points {
            let cell = grids.cell_for(p.x, p.y);
            assert!(cell.is_some(), "({}, {}) outside its grid", p.x, p.y);
        }
    }
}

#[test]
fn test_dimensions_for_sign_patterns() {
    // Each axis independently positive, straddling, or negative
    let ranges = [(0.5, 3.2), (-2.5, 1.5), (-4.0, -0.5)];
    for &(min_x, max_x) in &ranges {
        for &(min_y, max_y) in &ranges {
            let points = [
                Point2D::new(min_x, min_y, 0.0),
                Point2D::new(max_x, max_y, 1.0),
            ];
            let grids = builder(2, ValueScale::Raw).build(&points).unwrap();
            let expected = (
                axis_cells(min_y, max_y, 2).unwrap(),
                axis_cells(min_x, max_x, 2).unwrap(),
            );
            for (_, grid) in grids.iter() {
                assert_eq!(grid.shape(), expected);
                assert!(grid.rows() >= 1 && grid.cols() >= 1);
            }
        }
    }
}

#[test]
fn test_normalized_values_in_unit_range() {
    let mut rng = Lcg::new(99);
    let points: Vec<Point2D> = ground_points(&mut rng, 300, 4.0)
        .into_iter()
        .map(|p| Point2D::new(p.x, p.y, p.value * 10.0 - 3.0))
        .collect();

    let grids = builder(2, ValueScale::Normalized).build(&points).unwrap();
    for (_, grid) in grids.iter() {
        assert!(grid.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn test_raw_values_within_input_range() {
    let mut rng = Lcg::new(23);
    let points = ground_points(&mut rng, 300, 3.0);
    let (grids, report) = builder(1, ValueScale::Raw)
        .build_with_report(&points)
        .unwrap();

    let (lo, hi) = report.value_range;
    for (_, grid) in grids.iter() {
        for &v in grid.values() {
            assert!(v == 0.0 || (lo - 1e-12..=hi + 1e-12).contains(&v));
        }
    }
    assert!(report.total_filled() > 0);
}

#[test]
fn test_empty_batch_uses_fallback() {
    let config = BhumiConfig::default();
    let builder = QuadrantGridBuilder::new(config.to_grid_config()).unwrap();

    let grids = match builder.build(&[]) {
        Err(MapError::EmptyInput(_)) => config.fallback_grids(),
        other => panic!("expected EmptyInput, got {other:?}"),
    };
    let q1 = grids.get(Quadrant::Q1);
    assert_eq!(q1.shape(), (1, 1));
    assert_eq!(q1.get(0, 0), Some(1.0));
}

#[test]
fn test_builder_is_stateless() {
    let b = builder(1, ValueScale::Raw);
    let first = b.build(&[Point2D::new(2.0, 2.0, 0.5)]).unwrap();
    b.build(&[Point2D::new(-5.0, 1.0, 0.9)]).unwrap();
    let again = b.build(&[Point2D::new(2.0, 2.0, 0.5)]).unwrap();
    assert_eq!(first, again);
}
