use crate::collision::{self, ACTOR_SIZE, Resolution};
use crate::geometry::{Rect, Surface};

/// The player-controlled square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub pos: [f32; 2], // top-left corner in world space
    pub vel: [f32; 2], // units per tick
}

impl Actor {
    pub fn new(pos: [f32; 2]) -> Self {
        Self {
            pos,
            vel: [0.0, 0.0],
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos[0], self.pos[1], ACTOR_SIZE, ACTOR_SIZE)
    }

    pub fn center_y(&self) -> f32 {
        self.pos[1] + 0.5 * ACTOR_SIZE
    }

    /// Advances one tick: classify and resolve against `surfaces`, keep the
    /// clamped velocity, then move by it from the corrected rectangle.
    pub fn step(&mut self, surfaces: &[Surface]) -> Resolution {
        let step = collision::check_collisions(self.pos, self.vel, surfaces);
        self.vel = step.velocity;
        self.pos = [step.rect.x + self.vel[0], step.rect.y + self.vel[1]];
        step.resolution
    }

    pub fn teleport(&mut self, pos: [f32; 2]) {
        log::debug!("teleport to ({:.1}, {:.1})", pos[0], pos[1]);
        self.pos = pos;
    }
}
