//! SVG scatter plot of a traversability point set.
//!
//! Renders each ground point as a dot colored by its value on a
//! viridis-like ramp, with a color bar for the value range. The plot is a
//! consumer of the points handed to the grid builder; nothing in the core
//! calls it.

use std::fmt::Write;
use std::path::Path;

use crate::core::{Bounds2D, Point2D};

/// Configuration for scatter rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per meter
    pub scale: f64,
    /// Dot radius in pixels
    pub point_radius: f64,
    /// Padding around the plot in pixels
    pub padding: f64,
    /// Draw a 1 m grid behind the points
    pub show_grid: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            point_radius: 3.0,
            padding: 30.0,
            show_grid: true,
        }
    }
}

/// Viridis anchor colors at t = 0, 0.25, 0.5, 0.75, 1.
const RAMP: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Hex color for `t` in [0, 1] (clamped).
pub fn value_color(t: f64) -> String {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (RAMP.len() - 1) as f64;
    let i = (pos.floor() as usize).min(RAMP.len() - 2);
    let f = pos - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    let (a, b) = (RAMP[i], RAMP[i + 1]);
    format!("#{:02X}{:02X}{:02X}", lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Scatter plot builder
#[derive(Clone, Debug)]
pub struct ScatterPlot {
    config: SvgConfig,
    points: Vec<Point2D>,
    title: Option<String>,
}

impl ScatterPlot {
    /// Create a plot of the given points
    pub fn new(points: &[Point2D], config: SvgConfig) -> Self {
        Self {
            config,
            points: points
                .iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .copied()
                .collect(),
            title: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Write the SVG to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.render())
    }

    fn write_svg(&self, svg: &mut String) -> std::fmt::Result {
        let bounds = Bounds2D::from_positions(self.points.iter().map(Point2D::position))
            .unwrap_or(Bounds2D {
                min_x: 0.0,
                max_x: 1.0,
                min_y: 0.0,
                max_y: 1.0,
            });
        let (lo, hi) = self.value_range();

        let scale = self.config.scale;
        let pad = self.config.padding;
        let title_h = if self.title.is_some() { 30.0 } else { 0.0 };
        let bar_w = 60.0;
        let plot_w = bounds.width().max(1.0) * scale;
        let plot_h = bounds.height().max(1.0) * scale;
        let width = plot_w + 2.0 * pad + bar_w;
        let height = plot_h + 2.0 * pad + title_h;

        // World to pixel, SVG Y axis points down
        let px = |x: f64| pad + (x - bounds.min_x) * scale;
        let py = |y: f64| pad + title_h + plot_h - (y - bounds.min_y) * scale;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#FFFFFF"/>"##)?;

        if let Some(title) = &self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                title
            )?;
        }

        if self.config.show_grid {
            writeln!(svg, r##"  <g id="grid" stroke="#DDDDDD" stroke-width="1">"##)?;
            for x in (bounds.min_x.floor() as i64)..=(bounds.max_x.ceil() as i64) {
                let x = px(x as f64);
                writeln!(
                    svg,
                    r#"    <line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}"/>"#,
                    py(bounds.min_y),
                    py(bounds.min_y) - plot_h
                )?;
            }
            for y in (bounds.min_y.floor() as i64)..=(bounds.max_y.ceil() as i64) {
                let y = py(y as f64);
                writeln!(
                    svg,
                    r#"    <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}"/>"#,
                    px(bounds.min_x),
                    px(bounds.min_x) + plot_w
                )?;
            }
            writeln!(svg, "  </g>")?;
        }

        writeln!(svg, r#"  <g id="points" fill-opacity="0.8">"#)?;
        for p in &self.points {
            let t = if hi > lo { (p.value - lo) / (hi - lo) } else { 0.0 };
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                px(p.x),
                py(p.y),
                self.config.point_radius,
                value_color(t)
            )?;
        }
        writeln!(svg, "  </g>")?;

        self.write_color_bar(svg, width - bar_w + 10.0, pad + title_h, plot_h, (lo, hi))?;
        writeln!(svg, "</svg>")
    }

    fn write_color_bar(
        &self,
        svg: &mut String,
        x: f64,
        y: f64,
        height: f64,
        (lo, hi): (f64, f64),
    ) -> std::fmt::Result {
        const STEPS: usize = 20;
        let step_h = height / STEPS as f64;
        writeln!(svg, r#"  <g id="colorbar">"#)?;
        for i in 0..STEPS {
            // Top of the bar is the highest value
            let t = 1.0 - (i as f64 + 0.5) / STEPS as f64;
            writeln!(
                svg,
                r#"    <rect x="{x:.1}" y="{:.1}" width="14" height="{:.1}" fill="{}"/>"#,
                y + i as f64 * step_h,
                step_h + 0.5,
                value_color(t)
            )?;
        }
        for (label, ly) in [(hi, y + 10.0), (lo, y + height)] {
            writeln!(
                svg,
                r##"    <text x="{:.1}" y="{ly:.1}" font-family="sans-serif" font-size="10" fill="#333">{label:.2}</text>"##,
                x + 18.0
            )?;
        }
        writeln!(svg, "  </g>")
    }

    fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .points
            .iter()
            .filter(|p| p.value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.value), hi.max(p.value))
            });
        if lo <= hi { (lo, hi) } else { (0.0, 0.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_color_endpoints() {
        assert_eq!(value_color(0.0), "#440154");
        assert_eq!(value_color(1.0), "#FDE725");
        assert_eq!(value_color(0.5), "#21918C");
        assert_eq!(value_color(-1.0), value_color(0.0));
        assert_eq!(value_color(f64::NAN), value_color(0.0));
    }

    #[test]
    fn test_render_points() {
        let points = [
            Point2D::new(0.0, 0.0, 0.0),
            Point2D::new(2.0, 1.0, 1.0),
            Point2D::new(f64::NAN, 0.0, 0.5),
        ];
        let svg = ScatterPlot::new(&points, SvgConfig::default())
            .with_title("Traversability Map")
            .render();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Traversability Map"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("#440154"));
        assert!(svg.contains("#FDE725"));
    }

    #[test]
    fn test_render_empty() {
        let svg = ScatterPlot::new(&[], SvgConfig::default()).render();
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.svg");
        ScatterPlot::new(&[Point2D::new(1.0, 1.0, 0.3)], SvgConfig::default())
            .save(&path)
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<circle"));
    }
}
