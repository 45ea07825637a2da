//! Terrain segmentation classes and their display palette.

use serde::{Deserialize, Serialize};

use super::point::Rgb;

/// Terrain class predicted by the segmentation model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainClass {
    /// Grass
    Grass = 0,
    /// Gravel
    Gravel = 1,
    /// Mulch
    Mulch = 2,
    /// Obstacle
    Obstacle = 3,
    /// Parking lot
    ParkingLot = 4,
    /// Sidewalk
    Sidewalk = 5,
    /// Reserved slot in the model output
    Unused = 6,
    /// Vegetation
    Vegetation = 7,
}

impl TerrainClass {
    /// All classes in id order.
    pub const ALL: [TerrainClass; 8] = [
        TerrainClass::Grass,
        TerrainClass::Gravel,
        TerrainClass::Mulch,
        TerrainClass::Obstacle,
        TerrainClass::ParkingLot,
        TerrainClass::Sidewalk,
        TerrainClass::Unused,
        TerrainClass::Vegetation,
    ];

    /// Class for a model output id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Model output id.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// 8-bit palette color.
    pub fn color_u8(self) -> (u8, u8, u8) {
        match self {
            TerrainClass::Grass => (255, 0, 0),
            TerrainClass::Gravel => (0, 255, 0),
            TerrainClass::Mulch => (0, 0, 255),
            TerrainClass::Obstacle => (255, 255, 0),
            TerrainClass::ParkingLot => (255, 0, 255),
            TerrainClass::Sidewalk => (0, 255, 255),
            TerrainClass::Unused => (255, 128, 0),
            TerrainClass::Vegetation => (128, 0, 255),
        }
    }

    /// Palette color with channels in [0, 1].
    pub fn color(self) -> Rgb {
        let (r, g, b) = self.color_u8();
        Rgb::from_u8(r, g, b)
    }

    /// Nearest palette class for a color.
    pub fn from_color(color: &Rgb) -> Self {
        let mut best = TerrainClass::Grass;
        let mut best_dist = f64::MAX;
        for class in Self::ALL {
            let dist = class.color().distance_squared(color);
            if dist < best_dist {
                best = class;
                best_dist = dist;
            }
        }
        best
    }
}

/// Color used for ids outside the palette.
pub fn unknown_class_color() -> Rgb {
    Rgb::from_u8(128, 128, 128)
}

/// Palette color for a raw class id, gray for unknown ids.
pub fn class_color(id: u8) -> Rgb {
    TerrainClass::from_id(id)
        .map(TerrainClass::color)
        .unwrap_or_else(unknown_class_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for class in TerrainClass::ALL {
            assert_eq!(TerrainClass::from_id(class.id()), Some(class));
        }
        assert_eq!(TerrainClass::from_id(8), None);
    }

    #[test]
    fn test_palette() {
        assert_eq!(TerrainClass::Sidewalk.color(), Rgb::new(0.0, 1.0, 1.0));
        assert_eq!(class_color(3), Rgb::new(1.0, 1.0, 0.0));
        assert_eq!(class_color(200), unknown_class_color());
    }

    #[test]
    fn test_from_color_nearest() {
        assert_eq!(
            TerrainClass::from_color(&Rgb::new(0.9, 0.1, 0.95)),
            TerrainClass::ParkingLot
        );
        assert_eq!(
            TerrainClass::from_color(&TerrainClass::Vegetation.color()),
            TerrainClass::Vegetation
        );
    }
}
