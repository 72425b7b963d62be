//! Jump-style vertical climbing platformer prototype.
//!
//! The core is [`collision`]: a step-wise resolver that moves a square actor
//! out of typed floor/ceiling/wall rectangles. Everything else loads the map,
//! tracks input and scroll state, and draws the result.

pub mod actor;
pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod map;
pub mod renderer;
pub mod scaler;
pub mod world;
