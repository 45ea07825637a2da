//! Flat binary point records.
//!
//! Clouds leave the core as packed little-endian `f32` records, laid out
//! like a ROS `PointCloud2` message with one `FLOAT32` field per value:
//!
//! ```text
//! XyzRgb        x:0  y:4  z:8  r:12 g:16 b:20    stride 24
//! XyzIntensity  x:0  y:4  z:8  intensity:12       stride 16
//! ```

use crate::core::{Attribute, Point3D, PointCloud3D, Rgb};

/// Errors decoding a packed point buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloudFormatError {
    /// Buffer does not hold a whole number of records
    #[error("buffer of {len} bytes is not a multiple of the {stride}-byte record")]
    BadLength {
        /// Buffer length in bytes
        len: usize,
        /// Record stride in bytes
        stride: usize,
    },

    /// Field list differs in length from the expected layout
    #[error("expected {expected} fields, got {actual}")]
    FieldCount {
        /// Fields in the layout
        expected: usize,
        /// Fields supplied
        actual: usize,
    },

    /// Field at some position has an unexpected name or offset
    #[error("field {index} is {actual}, expected {expected}")]
    FieldMismatch {
        /// Position in the field list
        index: usize,
        /// Expected `name@offset`
        expected: String,
        /// Supplied `name@offset`
        actual: String,
    },
}

/// One `FLOAT32` field of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointField {
    /// Field name
    pub name: String,
    /// Byte offset inside the record
    pub offset: u32,
}

impl PointField {
    /// Create a field.
    pub fn new(name: impl Into<String>, offset: u32) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

impl std::fmt::Display for PointField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.offset)
    }
}

/// Supported record layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLayout {
    /// Position plus color
    XyzRgb,
    /// Position plus scalar intensity
    XyzIntensity,
}

impl PointLayout {
    fn names(self) -> &'static [&'static str] {
        match self {
            PointLayout::XyzRgb => &["x", "y", "z", "r", "g", "b"],
            PointLayout::XyzIntensity => &["x", "y", "z", "intensity"],
        }
    }

    /// Number of `f32` values per record.
    pub fn field_count(self) -> usize {
        self.names().len()
    }

    /// Bytes per record.
    pub fn stride(self) -> usize {
        self.field_count() * 4
    }

    /// Field descriptors in record order.
    pub fn fields(self) -> Vec<PointField> {
        self.names()
            .iter()
            .enumerate()
            .map(|(i, name)| PointField::new(*name, (i * 4) as u32))
            .collect()
    }

    /// Check that a received field list matches this layout.
    pub fn check_fields(self, fields: &[PointField]) -> Result<(), CloudFormatError> {
        let expected = self.fields();
        if fields.len() != expected.len() {
            return Err(CloudFormatError::FieldCount {
                expected: expected.len(),
                actual: fields.len(),
            });
        }
        for (index, (want, got)) in expected.iter().zip(fields).enumerate() {
            if want != got {
                return Err(CloudFormatError::FieldMismatch {
                    index,
                    expected: want.to_string(),
                    actual: got.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Attributes with a packed record representation.
pub trait WireAttribute: Attribute {
    /// Record layout carrying this attribute.
    const LAYOUT: PointLayout;

    /// Append the attribute's values after x, y, z.
    fn push_values(&self, out: &mut Vec<f32>);

    /// Rebuild from the values following x, y, z.
    fn from_values(values: &[f32]) -> Self;
}

impl WireAttribute for Rgb {
    const LAYOUT: PointLayout = PointLayout::XyzRgb;

    fn push_values(&self, out: &mut Vec<f32>) {
        out.extend([self.r as f32, self.g as f32, self.b as f32]);
    }

    fn from_values(values: &[f32]) -> Self {
        Rgb::new(values[0] as f64, values[1] as f64, values[2] as f64)
    }
}

impl WireAttribute for f64 {
    const LAYOUT: PointLayout = PointLayout::XyzIntensity;

    fn push_values(&self, out: &mut Vec<f32>) {
        out.push(*self as f32);
    }

    fn from_values(values: &[f32]) -> Self {
        values[0] as f64
    }
}

/// Pack a cloud into little-endian records.
pub fn encode_cloud<A: WireAttribute>(cloud: &PointCloud3D<A>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(cloud.len() * A::LAYOUT.stride());
    let mut values = Vec::with_capacity(A::LAYOUT.field_count());
    for p in cloud {
        values.clear();
        values.extend([p.x as f32, p.y as f32, p.z as f32]);
        p.attr.push_values(&mut values);
        for v in &values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

/// Unpack little-endian records.
///
/// Records with a NaN coordinate are skipped.
pub fn decode_cloud<A: WireAttribute>(bytes: &[u8]) -> Result<PointCloud3D<A>, CloudFormatError> {
    let stride = A::LAYOUT.stride();
    if bytes.len() % stride != 0 {
        return Err(CloudFormatError::BadLength {
            len: bytes.len(),
            stride,
        });
    }

    let mut values = Vec::with_capacity(A::LAYOUT.field_count());
    let mut cloud = PointCloud3D::with_capacity(bytes.len() / stride);
    for record in bytes.chunks_exact(stride) {
        values.clear();
        values.extend(
            record
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        );
        if values[..3].iter().any(|v| v.is_nan()) {
            continue;
        }
        cloud.push(Point3D::new(
            values[0] as f64,
            values[1] as f64,
            values[2] as f64,
            A::from_values(&values[3..]),
        ));
    }
    Ok(cloud)
}

/// Unpack records after checking the sender's field list.
pub fn decode_cloud_with_fields<A: WireAttribute>(
    bytes: &[u8],
    fields: &[PointField],
) -> Result<PointCloud3D<A>, CloudFormatError> {
    A::LAYOUT.check_fields(fields)?;
    decode_cloud(bytes)
}
