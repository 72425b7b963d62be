/// Vertical scroll state. The map is a stack of screen-sized bands and the
/// camera shows the band containing the actor's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub level: u32,       // band index, 0 at the top of the map
    pub offset: f32,      // added to world Y to get screen Y (<= 0)
    pub viewport_h: f32,
    pub max_level: u32,
}

impl Camera {
    pub fn new(viewport_h: f32, map_height: f32) -> Self {
        Self {
            level: 0,
            offset: 0.0,
            viewport_h,
            max_level: max_level_for(map_height, viewport_h),
        }
    }

    /// Band containing world Y `center_y`, clamped to the map.
    pub fn level_for(&self, center_y: f32) -> u32 {
        let band = (center_y / self.viewport_h).floor();
        if band <= 0.0 {
            0
        } else {
            (band as u32).min(self.max_level)
        }
    }

    /// Re-derives band and offset from the actor's center. Returns true on a band change.
    pub fn follow(&mut self, center_y: f32) -> bool {
        let level = self.level_for(center_y);
        let changed = level != self.level;
        if changed {
            log::info!("level band {} -> {}", self.level, level);
        }
        self.level = level;
        self.offset = -(level as f32) * self.viewport_h;
        changed
    }

    #[inline]
    pub fn world_to_screen(&self, p: [f32; 2]) -> [f32; 2] {
        [p[0], p[1] + self.offset]
    }

    #[inline]
    pub fn screen_to_world(&self, p: [f32; 2]) -> [f32; 2] {
        [p[0], p[1] + self.offset.abs()]
    }
}

/// Highest band index for a map `map_height` pixels tall.
pub fn max_level_for(map_height: f32, viewport_h: f32) -> u32 {
    if viewport_h <= 0.0 || map_height <= viewport_h {
        return 0;
    }
    ((map_height / viewport_h).ceil() as u32).saturating_sub(1)
}
