//! Default value functions for serde deserialization.

pub fn voxel_size() -> f64 {
    0.5
}

pub fn distance_threshold() -> f64 {
    0.5
}

pub fn terrain_voxel_size() -> f64 {
    0.25
}

pub fn resolution() -> u32 {
    1
}

pub fn fallback_value() -> f64 {
    1.0
}

pub fn fallback_cells() -> usize {
    1
}

pub fn focal_length() -> f64 {
    205.47
}

pub fn principal_x() -> f64 {
    320.5
}

pub fn principal_y() -> f64 {
    180.5
}

pub fn camera_voxel_size() -> f64 {
    0.35
}
