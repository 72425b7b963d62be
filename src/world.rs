use crate::geometry::{Slope, Surface};

/// Decoded background picture, pixels packed as 0x00RRGGBB.
pub struct Background {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// Static level geometry, loaded once and never mutated.
pub struct World {
    pub surfaces: Vec<Surface>,
    pub slopes: Vec<Slope>,
    pub background: Option<Background>,
    pub width: f32,  // map size in pixels
    pub height: f32,
}
