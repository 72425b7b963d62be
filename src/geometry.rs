use std::str::FromStr;

use crate::error::GameError;

/// Axis-aligned rectangle in world space, Y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + 0.5 * self.w
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + 0.5 * self.h
    }

    // Edge setters move the rectangle, size is untouched
    #[inline]
    pub fn set_left(&mut self, v: f32) {
        self.x = v;
    }

    #[inline]
    pub fn set_right(&mut self, v: f32) {
        self.x = v - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, v: f32) {
        self.y = v;
    }

    #[inline]
    pub fn set_bottom(&mut self, v: f32) {
        self.y = v - self.h;
    }

    /// Strict AABB overlap. Shared edges do not count, and a rectangle with
    /// zero width or height never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w == 0.0 || self.h == 0.0 || other.w == 0.0 || other.h == 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Which way a static rectangle blocks the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    /// Blocks from below; the actor stands on its top edge.
    Floor,
    /// Blocks from above; the actor bumps into its bottom edge.
    Ceiling,
    /// Wall whose left face blocks an actor approaching from the left.
    LeftWall,
    /// Wall whose right face blocks an actor approaching from the right.
    RightWall,
}

impl FromStr for SurfaceType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f" => Ok(SurfaceType::Floor),
            "c" => Ok(SurfaceType::Ceiling),
            "l" => Ok(SurfaceType::LeftWall),
            "r" => Ok(SurfaceType::RightWall),
            other => Err(GameError::UnknownSurfaceType(other.to_string())),
        }
    }
}

/// Static collision rectangle loaded from the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub rect: Rect,
    pub kind: SurfaceType,
}

impl Surface {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, kind: SurfaceType) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Slope of a segment with the sign flipped so that "up" on screen is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gradient {
    Finite(f32),
    /// Both endpoints share an X coordinate.
    Vertical,
}

/// Line segment from the map's slope layer. Not used by collision resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Slope {
    pub start: Point,
    pub end: Point,
    pub kind: Option<String>,
    pub gradient: Gradient,
}

impl Slope {
    pub fn new(start: Point, end: Point, kind: Option<String>) -> Self {
        Self {
            start,
            end,
            kind,
            gradient: gradient_between(start, end),
        }
    }

    /// Reorders the endpoints so `start` is the lower one on screen
    /// (`start.y >= end.y` afterwards). The gradient does not depend on order.
    pub fn correct_points(&mut self) {
        if self.start.y < self.end.y {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }
}

fn gradient_between(start: Point, end: Point) -> Gradient {
    let dx = end.x - start.x;
    if dx == 0.0 {
        return Gradient::Vertical;
    }
    Gradient::Finite((end.y - start.y) / dx * -1.0)
}
