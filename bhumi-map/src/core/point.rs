//! Point types and per-point attribute payloads.

use serde::{Deserialize, Serialize};

/// Per-point payload that can be averaged.
///
/// Voxel downsampling and map fusion never look inside the payload; they
/// only need to sum payloads and divide by a count. Attributes never take
/// part in distance computations.
pub trait Attribute: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync {
    /// Add another payload into this one.
    fn accumulate(&mut self, other: &Self);

    /// Return this payload multiplied by `factor`.
    fn scaled(&self, factor: f64) -> Self;
}

/// Scalar intensity (traversability, LiDAR intensity).
impl Attribute for f64 {
    #[inline]
    fn accumulate(&mut self, other: &Self) {
        *self += *other;
    }

    #[inline]
    fn scaled(&self, factor: f64) -> Self {
        *self * factor
    }
}

/// Position-only clouds, such as a SLAM reference map.
impl Attribute for () {
    #[inline]
    fn accumulate(&mut self, _other: &Self) {}

    #[inline]
    fn scaled(&self, _factor: f64) -> Self {}
}

/// Color triple with channels in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Rgb {
    /// Create a color from float channels.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Squared distance to another color in RGB space.
    #[inline]
    pub fn distance_squared(&self, other: &Rgb) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

impl Attribute for Rgb {
    #[inline]
    fn accumulate(&mut self, other: &Self) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
    }

    #[inline]
    fn scaled(&self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// A 3D point with an attribute payload.
///
/// Coordinates are in meters in the map frame unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D<A = Rgb> {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
    /// Z coordinate in meters
    pub z: f64,
    /// Attribute payload
    pub attr: A,
}

impl<A> Point3D<A> {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, attr: A) -> Self {
        Self { x, y, z, attr }
    }

    /// Position as an array, the form used by the spatial index.
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance between positions (attributes ignored).
    #[inline]
    pub fn distance<B>(&self, other: &Point3D<B>) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True if every coordinate is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Point3D<()> {
    /// Position-only point.
    #[inline]
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, ())
    }
}

/// A ground-plane point carrying a traversability value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
    /// Traversability intensity
    pub value: f64,
}

impl Point2D {
    /// Create a new ground point.
    #[inline]
    pub const fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Planar position as an array.
    #[inline]
    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Drop the height of an intensity point (the `/trav_map` cloud is XYZI).
impl From<&Point3D<f64>> for Point2D {
    fn from(p: &Point3D<f64>) -> Self {
        Self::new(p.x, p.y, p.attr)
    }
}
