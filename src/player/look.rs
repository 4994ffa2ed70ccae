//! Mouse look and the first-person camera rig

use glam::{Quat, Vec2, Vec3};

use crate::core::PlayerConfig;
use crate::math::blend_vec3;

use super::controller::CharacterState;

/// Apply one frame of look input: clamped pitch, unclamped yaw.
///
/// Pitch belongs to the camera's local rotation; yaw rotates the body, so
/// the movement basis follows it. Look deltas are raw counts, not
/// dt-scaled.
pub fn update_look(state: &mut CharacterState, look_delta: Vec2, config: &PlayerConfig) {
    state.pitch = (state.pitch - look_delta.y * config.look_sensitivity)
        .clamp(-config.pitch_limit, config.pitch_limit);
    state.yaw += look_delta.x * config.look_sensitivity;
}

/// Smoothed first-person camera position with crouch offset and head bob
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Standing camera position in actor-local space, captured at spawn
    base_position: Vec3,
    /// Current interpolated local position
    position: Vec3,
    /// Head bob phase accumulator
    bob_timer: f32,
}

impl CameraRig {
    /// Create a rig at its standing position
    #[must_use]
    pub fn new(base_position: Vec3) -> Self {
        Self {
            base_position,
            position: base_position,
            bob_timer: 0.0,
        }
    }

    /// Camera position in actor-local space
    #[must_use]
    pub fn local_position(&self) -> Vec3 {
        self.position
    }

    /// Camera rotation in actor-local space (pitch only)
    #[must_use]
    pub fn local_rotation(state: &CharacterState) -> Quat {
        Quat::from_rotation_x(state.pitch)
    }

    /// Body rotation from the accumulated yaw
    #[must_use]
    pub fn body_rotation(state: &CharacterState) -> Quat {
        Quat::from_rotation_y(state.yaw)
    }

    /// Advance the camera toward its target local position.
    ///
    /// The crouch offset scales with the shared crouch weight; head bob runs
    /// only while moving un-crouched and resets when idle.
    pub fn update(
        &mut self,
        state: &CharacterState,
        walking: bool,
        running: bool,
        crouching: bool,
        config: &PlayerConfig,
        dt: f32,
    ) {
        let mut target = self.base_position + config.crouch_camera_offset * state.crouch_weight;

        if walking && !crouching {
            let bob = &config.head_bob;
            self.bob_timer += dt * bob.frequency * if running { 1.5 } else { 1.0 };
            target.y += (self.bob_timer * 2.0).sin() * bob.vertical_amplitude;
            target.x += self.bob_timer.cos() * bob.horizontal_amplitude;
        } else {
            self.bob_timer = 0.0;
        }

        let rate = if state.crouch_weight >= 0.5 {
            config.transition_down_rate
        } else {
            config.transition_up_rate
        };
        self.position = blend_vec3(self.position, target, rate, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped_to_limit() {
        let config = PlayerConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, 2.0);

        for _ in 0..100 {
            update_look(&mut state, Vec2::new(0.0, -500.0), &config);
        }
        assert!((state.pitch - config.pitch_limit).abs() < 1e-6);

        for _ in 0..100 {
            update_look(&mut state, Vec2::new(0.0, 500.0), &config);
        }
        assert!((state.pitch + config.pitch_limit).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_accumulates_without_clamp() {
        let config = PlayerConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, 2.0);

        for _ in 0..100 {
            update_look(&mut state, Vec2::new(500.0, 0.0), &config);
        }
        // Well past a full rotation
        assert!(state.yaw > std::f32::consts::TAU);
    }

    #[test]
    fn test_camera_follows_crouch_weight() {
        let config = PlayerConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, 2.0);
        state.crouch_weight = 1.0;
        let mut rig = CameraRig::new(config.eye_offset);

        for _ in 0..300 {
            rig.update(&state, false, false, true, &config, 1.0 / 60.0);
        }

        let expected = config.eye_offset + config.crouch_camera_offset;
        assert!((rig.local_position() - expected).length() < 1e-2);
    }

    #[test]
    fn test_head_bob_resets_when_idle() {
        let config = PlayerConfig::default();
        let state = CharacterState::new(Vec3::ZERO, 2.0);
        let mut rig = CameraRig::new(config.eye_offset);

        for _ in 0..30 {
            rig.update(&state, true, false, false, &config, 1.0 / 60.0);
        }
        assert!(rig.bob_timer > 0.0);

        rig.update(&state, false, false, false, &config, 1.0 / 60.0);
        assert_eq!(rig.bob_timer, 0.0);
    }

    #[test]
    fn test_no_bob_while_crouched() {
        let config = PlayerConfig::default();
        let state = CharacterState::new(Vec3::ZERO, 2.0);
        let mut rig = CameraRig::new(config.eye_offset);

        rig.update(&state, true, false, true, &config, 1.0 / 60.0);
        assert_eq!(rig.bob_timer, 0.0);
    }
}
