//! Axis-aware collision between the actor and the static surfaces.
//!
//! A step runs in two phases. [`classify`] tests the tentative rectangle
//! (position + velocity) against every surface, picks the active floor and
//! ceiling, collects every touched wall and zeroes the blocked velocity
//! axes. [`resolve`] then walks an ordered decision list over that contact
//! set and snaps the rectangle out of the surfaces it penetrates.
//!
//! Ledge and corner cases only look at the first one or two recorded walls;
//! further walls in the list are ignored.

use crate::geometry::{Rect, Surface, SurfaceType};

/// Width and height of the actor.
pub const ACTOR_SIZE: f32 = 50.0;

/// Surfaces touched by the tentative rectangle during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet<'a> {
    /// Touched floor with the largest Y.
    pub floor: Option<&'a Surface>,
    /// Touched ceiling with the smallest Y.
    pub ceiling: Option<&'a Surface>,
    /// Every touched wall, in surface order.
    pub walls: Vec<&'a Surface>,
}

impl ContactSet<'_> {
    pub fn touching_floor(&self) -> bool {
        self.floor.is_some()
    }

    pub fn touching_ceiling(&self) -> bool {
        self.ceiling.is_some()
    }

    pub fn touching_wall(&self) -> bool {
        !self.walls.is_empty()
    }

    /// Number of surface types touched (0..=3).
    pub fn active_types(&self) -> usize {
        [self.touching_floor(), self.touching_ceiling(), self.touching_wall()]
            .into_iter()
            .filter(|&t| t)
            .count()
    }
}

/// Which branch of the decision list produced the corrected rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing touched.
    Unobstructed,
    /// One surface type touched; every touched surface snapped in turn.
    SingleSurface,
    /// Floor plus two same-side walls.
    FloorLedge,
    /// Ceiling plus two same-side walls.
    CeilingLedge,
    /// Floor with a wall rising beside the actor on the far side of the floor's center.
    FloorEdge,
    /// Ceiling with a wall hanging beside the actor on the far side of the ceiling's center.
    CeilingEdge,
    /// Floor/wall corner; the deeper penetration decides.
    FloorCorner,
    /// Ceiling/wall corner; the deeper penetration decides.
    CeilingCorner,
    /// Contacts matched no branch (floor and ceiling without walls).
    Unresolved,
}

/// Outcome of one collision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Corrected actor rectangle.
    pub rect: Rect,
    /// Velocity with blocked axes zeroed.
    pub velocity: [f32; 2],
    pub resolution: Resolution,
}

#[inline]
pub fn tentative_rect(position: [f32; 2], velocity: [f32; 2]) -> Rect {
    Rect::new(
        position[0] + velocity[0],
        position[1] + velocity[1],
        ACTOR_SIZE,
        ACTOR_SIZE,
    )
}

/// Collects the surfaces overlapping `tentative` and zeroes the velocity
/// axis each of them blocks.
pub fn classify<'a>(
    tentative: &Rect,
    velocity: &mut [f32; 2],
    surfaces: &'a [Surface],
) -> ContactSet<'a> {
    let mut contacts = ContactSet::default();

    for surface in surfaces.iter().filter(|s| tentative.overlaps(&s.rect)) {
        match surface.kind {
            SurfaceType::Ceiling => {
                if contacts
                    .ceiling
                    .is_none_or(|current| current.rect.y > surface.rect.y)
                {
                    velocity[1] = 0.0;
                    contacts.ceiling = Some(surface);
                }
            }
            SurfaceType::Floor => {
                if contacts
                    .floor
                    .is_none_or(|current| current.rect.y < surface.rect.y)
                {
                    velocity[1] = 0.0;
                    contacts.floor = Some(surface);
                }
            }
            SurfaceType::LeftWall | SurfaceType::RightWall => {
                velocity[0] = 0.0;
                contacts.walls.push(surface);
            }
        }
    }

    contacts
}

/// Moves `rect` out of the surfaces in `contacts`. First matching branch wins.
pub fn resolve(mut rect: Rect, contacts: &ContactSet) -> (Rect, Resolution) {
    let walls = &contacts.walls;

    let resolution = match contacts.active_types() {
        0 => Resolution::Unobstructed,
        1 => {
            snap_all(&mut rect, contacts);
            Resolution::SingleSurface
        }
        _ => resolve_multi(&mut rect, contacts, walls),
    };

    (rect, resolution)
}

fn resolve_multi(rect: &mut Rect, contacts: &ContactSet, walls: &[&Surface]) -> Resolution {
    if let Some(floor) = contacts.floor {
        if let Some((a, b)) = same_side_pair(walls) {
            snap_to_wall(rect, farthest_wall(a, b));
            rect.set_bottom(floor.rect.top());
            return Resolution::FloorLedge;
        }
    }

    if let Some(ceiling) = contacts.ceiling {
        if let Some((a, b)) = same_side_pair(walls) {
            snap_to_wall(rect, farthest_wall(a, b));
            rect.set_top(ceiling.rect.bottom());
            return Resolution::CeilingLedge;
        }
    }

    if let Some(floor) = contacts.floor {
        if wall_beside(rect, floor, walls) {
            snap_all(rect, contacts);
            return Resolution::FloorEdge;
        }
    }

    if let Some(ceiling) = contacts.ceiling {
        if wall_beside(rect, ceiling, walls) {
            snap_all(rect, contacts);
            return Resolution::CeilingEdge;
        }
    }

    if let (Some(floor), Some(wall)) = (contacts.floor, walls.first()) {
        let vertical = rect.bottom() - floor.rect.top();
        if vertical > wall_penetration(rect, wall) {
            snap_to_wall(rect, wall);
        } else {
            rect.set_bottom(floor.rect.top());
        }
        return Resolution::FloorCorner;
    }

    if let (Some(ceiling), Some(wall)) = (contacts.ceiling, walls.first()) {
        let vertical = ceiling.rect.bottom() - rect.top();
        if vertical > wall_penetration(rect, wall) {
            snap_to_wall(rect, wall);
        } else {
            rect.set_top(ceiling.rect.bottom());
        }
        return Resolution::CeilingCorner;
    }

    Resolution::Unresolved
}

/// Snaps every active contact. Walls go in list order, so with several
/// walls of one side the last one processed wins.
fn snap_all(rect: &mut Rect, contacts: &ContactSet) {
    if let Some(floor) = contacts.floor {
        rect.set_bottom(floor.rect.top());
    }
    if let Some(ceiling) = contacts.ceiling {
        rect.set_top(ceiling.rect.bottom());
    }
    for wall in &contacts.walls {
        snap_to_wall(rect, wall);
    }
}

fn snap_to_wall(rect: &mut Rect, wall: &Surface) {
    match wall.kind {
        SurfaceType::LeftWall => rect.set_right(wall.rect.left()),
        SurfaceType::RightWall => rect.set_left(wall.rect.right()),
        SurfaceType::Floor | SurfaceType::Ceiling => {}
    }
}

/// How far `rect` has pushed through the blocking face of `wall`.
fn wall_penetration(rect: &Rect, wall: &Surface) -> f32 {
    match wall.kind {
        SurfaceType::LeftWall => rect.right() - wall.rect.left(),
        _ => wall.rect.right() - rect.left(),
    }
}

fn same_side_pair<'s, 'a>(walls: &'s [&'a Surface]) -> Option<(&'a Surface, &'a Surface)> {
    match walls {
        [a, b, ..] if a.kind == b.kind => Some((*a, *b)),
        _ => None,
    }
}

/// The wall reaching furthest in its blocking direction: larger left edge
/// for left-walls, smaller right edge for right-walls.
fn farthest_wall<'a>(a: &'a Surface, b: &'a Surface) -> &'a Surface {
    let a_wins = match a.kind {
        SurfaceType::LeftWall => a.rect.left() > b.rect.left(),
        _ => a.rect.right() < b.rect.right(),
    };
    if a_wins { a } else { b }
}

/// True when the first wall sits on the side of `surface` the actor has moved past.
fn wall_beside(rect: &Rect, surface: &Surface, walls: &[&Surface]) -> bool {
    let Some(first) = walls.first() else {
        return false;
    };
    let cx = rect.center_x();
    let mid = surface.rect.center_x();
    (cx > mid && first.kind == SurfaceType::LeftWall)
        || (cx < mid && first.kind == SurfaceType::RightWall)
}

/// Runs one collision step for an actor at `position` moving by `velocity`.
pub fn check_collisions(position: [f32; 2], velocity: [f32; 2], surfaces: &[Surface]) -> Step {
    let tentative = tentative_rect(position, velocity);
    let mut velocity = velocity;
    let contacts = classify(&tentative, &mut velocity, surfaces);
    let (rect, resolution) = resolve(tentative, &contacts);

    if resolution != Resolution::Unobstructed {
        log::trace!(
            "collision {:?}: floor={} ceiling={} walls={} -> ({:.1}, {:.1})",
            resolution,
            contacts.touching_floor(),
            contacts.touching_ceiling(),
            contacts.walls.len(),
            rect.x,
            rect.y
        );
    }

    Step {
        rect,
        velocity,
        resolution,
    }
}
