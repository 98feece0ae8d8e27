//! Keyboard input and the rotation it drives.
//!
//! Events are collected into a [`KeyboardState`] while polling and read once per frame, so
//! rotation only changes between frames.

use std::collections::HashSet;

use sdl2::{event::Event, keyboard::Keycode};

/// Degrees added to or removed from an angle per key event.
pub const ROTATION_STEP: f32 = 5.0;

/// The current state of the keyboard for one frame.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    /// Keys that went down this frame, in order.
    pub pressed: Vec<Keycode>,
    /// Key repeat events received this frame, in order. A held key shows up once per repeat.
    pub repeated: Vec<Keycode>,
    pub quit: bool,
}

impl KeyboardState {
    /// Clears the per-frame events. Held keys stay down.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.repeated.clear();
    }

    /// Records an SDL event.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.quit = true,
            Event::KeyDown {
                keycode: Some(keycode),
                repeat,
                ..
            } => self.key_down(*keycode, *repeat),
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => self.key_up(*keycode),
            _ => {}
        }
    }

    pub fn key_down(&mut self, keycode: Keycode, repeat: bool) {
        if repeat {
            self.repeated.push(keycode);
        } else {
            self.down.insert(keycode);
            self.pressed.push(keycode);
        }
    }

    pub fn key_up(&mut self, keycode: Keycode) {
        self.down.remove(&keycode);
    }

    /// Whether the window was asked to close or Escape is held.
    pub fn close_requested(&self) -> bool {
        self.quit || self.down.contains(&Keycode::Escape)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Returns the axis and signed step a key rotates by, if any.
pub fn rotation_for_key(keycode: Keycode) -> Option<(Axis, f32)> {
    match keycode {
        Keycode::W => Some((Axis::X, ROTATION_STEP)),
        Keycode::S => Some((Axis::X, -ROTATION_STEP)),
        Keycode::A => Some((Axis::Y, ROTATION_STEP)),
        Keycode::D => Some((Axis::Y, -ROTATION_STEP)),
        Keycode::Up => Some((Axis::Z, ROTATION_STEP)),
        Keycode::Down => Some((Axis::Z, -ROTATION_STEP)),
        _ => None,
    }
}

/// Accumulated rotation angles in degrees. The angles are not wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        match axis {
            Axis::X => self.x += degrees,
            Axis::Y => self.y += degrees,
            Axis::Z => self.z += degrees,
        }
    }

    /// Applies one key event. Returns whether the key is a rotation key.
    pub fn apply_key(&mut self, keycode: Keycode) -> bool {
        match rotation_for_key(keycode) {
            Some((axis, step)) => {
                self.rotate(axis, step);
                true
            }
            None => false,
        }
    }

    /// Applies this frame's key repeats, and the initial presses too if `on_press` is set.
    pub fn apply_input(&mut self, keyboard: &KeyboardState, on_press: bool) {
        let presses = if on_press { keyboard.pressed.as_slice() } else { &[] };
        let mut changed = false;
        for &keycode in presses.iter().chain(&keyboard.repeated) {
            changed |= self.apply_key(keycode);
        }
        if changed {
            log::trace!("Rotation is now ({}, {}, {})", self.x, self.y, self.z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(keyboard: &mut KeyboardState, keycode: Keycode, times: usize) {
        for _ in 0..times {
            keyboard.key_down(keycode, true);
        }
    }

    #[test]
    fn test_repeats_accumulate() {
        for n in [0, 1, 7, 100] {
            let mut keyboard = KeyboardState::default();
            keyboard.key_down(Keycode::W, false);
            repeat(&mut keyboard, Keycode::W, n);

            let mut rotation = Rotation::default();
            rotation.apply_input(&keyboard, false);
            assert_eq!(rotation.x, 5.0 * n as f32);
            assert_eq!((rotation.y, rotation.z), (0.0, 0.0));
        }
    }

    #[test]
    fn test_angles_are_unbounded() {
        let mut keyboard = KeyboardState::default();
        repeat(&mut keyboard, Keycode::S, 80);

        let mut rotation = Rotation::default();
        rotation.apply_input(&keyboard, false);
        assert_eq!(rotation.x, -400.0);
        assert_eq!(rotation.x.rem_euclid(360.0), 320.0);
    }

    #[test]
    fn test_key_mapping() {
        let mut rotation = Rotation::default();
        for key in [Keycode::W, Keycode::A, Keycode::A, Keycode::Up, Keycode::Up, Keycode::Up] {
            assert!(rotation.apply_key(key));
        }
        assert_eq!(rotation, Rotation { x: 5.0, y: 10.0, z: 15.0 });

        for key in [Keycode::S, Keycode::D, Keycode::Down] {
            assert!(rotation.apply_key(key));
        }
        assert_eq!(rotation, Rotation { x: 0.0, y: 5.0, z: 10.0 });

        assert!(!rotation.apply_key(Keycode::Q));
        assert!(!rotation.apply_key(Keycode::Space));
        assert_eq!(rotation, Rotation { x: 0.0, y: 5.0, z: 10.0 });
    }

    #[test]
    fn test_press_only_rotates_when_enabled() {
        let mut keyboard = KeyboardState::default();
        keyboard.key_down(Keycode::A, false);

        let mut rotation = Rotation::default();
        rotation.apply_input(&keyboard, false);
        assert_eq!(rotation.y, 0.0);

        rotation.apply_input(&keyboard, true);
        assert_eq!(rotation.y, 5.0);
    }

    #[test]
    fn test_begin_frame_keeps_held_keys() {
        let mut keyboard = KeyboardState::default();
        keyboard.key_down(Keycode::Escape, false);
        repeat(&mut keyboard, Keycode::W, 2);
        keyboard.begin_frame();

        assert!(keyboard.pressed.is_empty());
        assert!(keyboard.repeated.is_empty());
        assert!(keyboard.close_requested());

        keyboard.key_up(Keycode::Escape);
        assert!(!keyboard.close_requested());
    }

    #[test]
    fn test_quit_requests_close() {
        let mut keyboard = KeyboardState::default();
        assert!(!keyboard.close_requested());
        keyboard.handle_event(&Event::Quit { timestamp: 0 });
        assert!(keyboard.close_requested());
    }
}
