//! PGM (P5) export of traversability grids.
//!
//! Cell values are clamped to [0, 1] and mapped to 0..=255. Row 0 is the
//! row nearest the X axis, so rows are written bottom-up to keep +Y
//! pointing up in the image.

use std::io::Write;
use std::path::Path;

use crate::traversability::Grid;

/// 8-bit pixel for a cell value.
#[inline]
pub fn cell_to_pixel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pixels of a grid in image order (top row first).
pub fn grid_to_pixels(grid: &Grid) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(grid.cell_count());
    for row in (0..grid.rows()).rev() {
        if let Some(cells) = grid.row(row) {
            pixels.extend(cells.iter().map(|&v| cell_to_pixel(v)));
        }
    }
    pixels
}

/// Write a grid as binary PGM.
pub fn write_pgm<W: Write>(grid: &Grid, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P5")?;
    writeln!(writer, "{} {}", grid.cols(), grid.rows())?;
    writeln!(writer, "255")?;
    writer.write_all(&grid_to_pixels(grid))?;
    writer.flush()
}

/// Write a grid as a binary PGM file.
pub fn export_pgm(grid: &Grid, path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_pgm(grid, std::io::BufWriter::new(file))?;
    log::debug!(
        "Exported {}x{} grid to {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(())
}
