//! Loads the bundled demo tower and drives the actor through it.

use std::path::Path;

use jump_climb::actor::Actor;
use jump_climb::camera::Camera;
use jump_climb::collision::Resolution;
use jump_climb::geometry::SurfaceType;
use jump_climb::input::{Control, InputState};
use jump_climb::map::load_map;
use jump_climb::world::World;

fn demo() -> World {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/demo.tmj");
    load_map(&path).unwrap()
}

#[test]
fn demo_map_loads() {
    let world = demo();
    assert_eq!((world.width, world.height), (1200.0, 1800.0));
    assert_eq!(world.surfaces.len(), 28);
    assert_eq!(world.slopes.len(), 1);
    assert!(world.background.is_none());

    let floors = world
        .surfaces
        .iter()
        .filter(|s| s.kind == SurfaceType::Floor)
        .count();
    assert_eq!(floors, 7);

    let camera = Camera::new(900.0, world.height);
    assert_eq!(camera.max_level, 1);
}

#[test]
fn holding_down_lands_on_first_block() {
    let world = demo();
    let mut actor = Actor::new([450.0, 1300.0]);
    let mut input = InputState::default();
    input.press(Control::Down);
    input.press(Control::Boost);

    let mut landed = None;
    for tick in 0..30 {
        input.apply(&mut actor.vel);
        if actor.step(&world.surfaces) == Resolution::SingleSurface {
            landed = Some(tick);
            break;
        }
    }
    assert!(landed.is_some());
    assert_eq!(actor.rect().bottom(), 1400.0);
    assert_eq!(actor.vel, [0.0, 0.0]);

    // still pressing down: stays on the floor
    for _ in 0..5 {
        input.apply(&mut actor.vel);
        actor.step(&world.surfaces);
    }
    assert_eq!(actor.rect().bottom(), 1400.0);
}

#[test]
fn walking_into_tower_wall_stops() {
    let world = demo();
    let mut actor = Actor::new([1100.0, 1700.0]);
    let mut input = InputState::default();
    input.press(Control::Right);

    for _ in 0..20 {
        input.apply(&mut actor.vel);
        actor.step(&world.surfaces);
    }
    assert_eq!(actor.rect().right(), 1180.0);
    assert_eq!(actor.pos[1], 1700.0);

    input.release(Control::Right, &mut actor.vel);
    assert_eq!(actor.vel, [0.0, 0.0]);
}

#[test]
fn climbing_changes_band() {
    let world = demo();
    let mut camera = Camera::new(900.0, world.height);
    let mut actor = Actor::new([600.0, 900.0]);
    camera.follow(actor.center_y());
    assert_eq!(camera.level, 1);

    actor.teleport(camera.screen_to_world([600.0, -100.0]));
    camera.follow(actor.center_y());
    assert_eq!(camera.level, 0);
    assert_eq!(camera.offset, 0.0);
}
