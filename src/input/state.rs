//! Input device tracking and per-tick sampling

use std::collections::HashSet;

use glam::Vec2;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use super::sample::InputSample;

/// Key bindings for the locomotion controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Move forward
    pub forward: KeyCode,
    /// Move backward
    pub backward: KeyCode,
    /// Strafe left
    pub left: KeyCode,
    /// Strafe right
    pub right: KeyCode,
    /// Sprint modifier
    pub run: KeyCode,
    /// Jump
    pub jump: KeyCode,
    /// Crouch
    pub crouch: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            crouch: KeyCode::ControlLeft,
        }
    }
}

/// Tracks device state between frames and produces per-tick snapshots.
///
/// The only code in the crate touching a device API; everything downstream
/// consumes the `InputSample` it emits.
#[derive(Debug)]
pub struct InputSampler {
    /// Currently pressed keys
    pressed: HashSet<KeyCode>,
    /// Accumulated raw mouse delta this frame
    mouse_delta: Vec2,
    /// Active key bindings
    bindings: KeyBindings,
}

impl InputSampler {
    /// Create a sampler with default WASD bindings
    #[must_use]
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    /// Create a sampler with custom bindings
    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            pressed: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            bindings,
        }
    }

    /// Process a keyboard event
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed.insert(key);
            }
            ElementState::Released => {
                self.pressed.remove(&key);
            }
        }
    }

    /// Accumulate a raw mouse delta (for first-person look)
    pub fn process_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Check if a key is currently pressed
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Active bindings
    #[must_use]
    pub fn bindings(&self) -> KeyBindings {
        self.bindings
    }

    /// Replace the bindings (runtime rebinding)
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    /// Build the snapshot for this tick
    #[must_use]
    pub fn sample(&self) -> InputSample {
        InputSample {
            move_forward: self.axis(self.bindings.forward, self.bindings.backward),
            move_right: self.axis(self.bindings.right, self.bindings.left),
            run: self.is_pressed(self.bindings.run),
            jump: self.is_pressed(self.bindings.jump),
            crouch: self.is_pressed(self.bindings.crouch),
            look_delta: self.mouse_delta,
        }
    }

    /// Call at the end of each frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        (self.is_pressed(positive) as i32 - self.is_pressed(negative) as i32) as f32
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_from_keys() {
        let mut sampler = InputSampler::new();
        sampler.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        sampler.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);

        let sample = sampler.sample();
        assert_eq!(sample.move_forward, 1.0);
        assert_eq!(sample.move_right, 0.0);
        assert!(sample.run);
        assert!(!sample.crouch);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let mut sampler = InputSampler::new();
        sampler.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        sampler.process_keyboard(KeyCode::KeyD, ElementState::Pressed);

        assert_eq!(sampler.sample().move_right, 0.0);
    }

    #[test]
    fn test_release_clears_key() {
        let mut sampler = InputSampler::new();
        sampler.process_keyboard(KeyCode::Space, ElementState::Pressed);
        sampler.process_keyboard(KeyCode::Space, ElementState::Released);

        assert!(!sampler.sample().jump);
    }

    #[test]
    fn test_mouse_delta_accumulates_until_end_frame() {
        let mut sampler = InputSampler::new();
        sampler.process_mouse_delta(Vec2::new(2.0, 1.0));
        sampler.process_mouse_delta(Vec2::new(1.0, -0.5));

        assert_eq!(sampler.sample().look_delta, Vec2::new(3.0, 0.5));

        sampler.end_frame();
        assert_eq!(sampler.sample().look_delta, Vec2::ZERO);
    }

    #[test]
    fn test_rebinding() {
        let mut sampler = InputSampler::new();
        let bindings = KeyBindings {
            forward: KeyCode::ArrowUp,
            ..KeyBindings::default()
        };
        sampler.set_bindings(bindings);

        sampler.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);
        assert_eq!(sampler.sample().move_forward, 1.0);
    }
}
