use std::collections::HashSet;

use winit::keyboard::KeyCode;

pub const BASE_SPEED: f32 = 3.0;
pub const BOOST_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Boost,
}

impl Control {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Control::Up),
            KeyCode::KeyS => Some(Control::Down),
            KeyCode::KeyA => Some(Control::Left),
            KeyCode::KeyD => Some(Control::Right),
            KeyCode::ShiftLeft => Some(Control::Boost),
            _ => None,
        }
    }
}

/// Controls currently held down. Owned by the app and fed into the actor's
/// velocity once per tick.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Control>,
}

impl InputState {
    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    /// Releasing a direction stops motion on its axis.
    pub fn release(&mut self, control: Control, velocity: &mut [f32; 2]) {
        self.held.remove(&control);
        match control {
            Control::Up | Control::Down => velocity[1] = 0.0,
            Control::Left | Control::Right => velocity[0] = 0.0,
            Control::Boost => {}
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub fn speed(&self) -> f32 {
        if self.is_held(Control::Boost) {
            BOOST_SPEED
        } else {
            BASE_SPEED
        }
    }

    /// Sets the velocity axis of every held direction. Up wins over Down and
    /// Left over Right when both are held.
    pub fn apply(&self, velocity: &mut [f32; 2]) {
        let speed = self.speed();
        if self.is_held(Control::Down) {
            velocity[1] = speed;
        }
        if self.is_held(Control::Up) {
            velocity[1] = -speed;
        }
        if self.is_held(Control::Right) {
            velocity[0] = speed;
        }
        if self.is_held(Control::Left) {
            velocity[0] = -speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_controls() {
        assert_eq!(Control::from_key(KeyCode::KeyW), Some(Control::Up));
        assert_eq!(Control::from_key(KeyCode::ShiftLeft), Some(Control::Boost));
        assert_eq!(Control::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn held_directions_set_velocity() {
        let mut input = InputState::default();
        let mut vel = [0.0, 0.0];
        input.press(Control::Right);
        input.press(Control::Down);
        input.apply(&mut vel);
        assert_eq!(vel, [BASE_SPEED, BASE_SPEED]);

        input.press(Control::Boost);
        input.apply(&mut vel);
        assert_eq!(vel, [BOOST_SPEED, BOOST_SPEED]);
    }

    #[test]
    fn opposite_directions_resolve_to_up_and_left() {
        let mut input = InputState::default();
        let mut vel = [0.0, 0.0];
        for c in [Control::Up, Control::Down, Control::Left, Control::Right] {
            input.press(c);
        }
        input.apply(&mut vel);
        assert_eq!(vel, [-BASE_SPEED, -BASE_SPEED]);
    }

    #[test]
    fn release_zeroes_axis_only() {
        let mut input = InputState::default();
        let mut vel = [0.0, 0.0];
        input.press(Control::Left);
        input.press(Control::Up);
        input.apply(&mut vel);

        input.release(Control::Up, &mut vel);
        assert_eq!(vel, [-BASE_SPEED, 0.0]);

        // velocity persists without held keys until released
        input.release(Control::Boost, &mut vel);
        assert_eq!(vel, [-BASE_SPEED, 0.0]);
        assert!(!input.is_held(Control::Up));
    }
}
