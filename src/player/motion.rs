//! Grounded and airborne motion integration

use glam::Vec3;

use crate::core::PlayerConfig;
use crate::input::InputSample;
use crate::math::yaw_basis;
use crate::physics::CharacterCollider;

use super::controller::CharacterState;

/// Integrate one frame of motion and apply it through the collider.
///
/// Crouch speed overrides run speed overrides walk speed. Vertical velocity
/// is preserved across airborne frames and reset on grounded ones; the jump
/// impulse requires a grounded, non-crouching frame. Gravity is subtracted
/// every frame regardless of grounding: while grounded the value quietly
/// accumulates until the next grounded branch resets it, and the collider
/// clamps the resulting penetration.
pub fn integrate_motion(
    state: &mut CharacterState,
    input: &InputSample,
    config: &PlayerConfig,
    collider: &mut dyn CharacterCollider,
    dt: f32,
) {
    let speed = if input.crouch {
        config.crouch_speed
    } else if input.run {
        config.run_speed
    } else {
        config.walk_speed
    };

    let (forward, right) = yaw_basis(state.yaw);
    let flat = (forward * input.move_forward + right * input.move_right) * speed;

    let mut vertical = state.velocity.y;
    if state.grounded {
        vertical = 0.0;
        if input.jump && !input.crouch {
            vertical = config.jump_force;
        }
    }
    vertical -= config.gravity * dt;

    state.velocity = Vec3::new(flat.x, vertical, flat.z);
    state.grounded = collider.move_by(state.velocity * dt, dt);
    state.position = collider.position();
}
