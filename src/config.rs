use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "jump-climb")]
#[command(version, about = "Vertical climbing platformer prototype")]
pub struct Config {
    /// Tiled JSON map export to load.
    #[arg(short, long, default_value = "assets/demo.tmj")]
    pub map: PathBuf,

    /// Actor start X in world pixels.
    #[arg(long, default_value_t = 600.0)]
    pub start_x: f32,

    /// Actor start Y in world pixels. Defaults to the top of the lowest band.
    #[arg(long)]
    pub start_y: Option<f32>,

    /// Logical viewport width.
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Logical viewport height; also the height of one level band.
    #[arg(long, default_value_t = 900)]
    pub height: u32,
}

impl Config {
    pub fn start_position(&self, max_level: u32) -> [f32; 2] {
        let y = self
            .start_y
            .unwrap_or(max_level as f32 * self.height as f32);
        [self.start_x, y]
    }
}
