//! Crouch weight blending and capsule resize

use crate::core::{CrouchTransitionMode, PlayerConfig};
use crate::math::{blend, lerp};
use crate::physics::CharacterCollider;

use super::controller::CharacterState;

/// Maintains the smoothed crouch weight and drives the capsule from it.
///
/// Capsule height, camera offset, and arm pose all read the same weight, so
/// the three can never desync. In `DelayedUncrouch` mode the weight is a
/// hard switch and standing up waits out the configured delay.
#[derive(Debug, Clone)]
pub struct CrouchBlend {
    mode: CrouchTransitionMode,
    /// Effective crouch flag after mode handling
    crouching: bool,
    /// Pending uncrouch countdown in delayed mode
    uncrouch_timer: Option<f32>,
}

impl CrouchBlend {
    /// Create a standing crouch blender
    #[must_use]
    pub fn new(mode: CrouchTransitionMode) -> Self {
        Self {
            mode,
            crouching: false,
            uncrouch_timer: None,
        }
    }

    /// Effective crouch flag for this frame
    #[must_use]
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Advance the weight toward the input and resize the capsule.
    ///
    /// The capsule center shifts by half the height delta so the feet stay
    /// planted through the transition.
    pub fn update(
        &mut self,
        state: &mut CharacterState,
        crouch_held: bool,
        config: &PlayerConfig,
        collider: &mut dyn CharacterCollider,
        dt: f32,
    ) {
        self.advance_flag(crouch_held, dt);

        let target = if self.crouching { 1.0 } else { 0.0 };
        state.crouch_weight = match self.mode {
            CrouchTransitionMode::Continuous => {
                let rate = if state.crouch_weight >= 0.5 {
                    config.transition_down_rate
                } else {
                    config.transition_up_rate
                };
                blend(state.crouch_weight, target, rate, dt)
            }
            CrouchTransitionMode::DelayedUncrouch { .. } => target,
        }
        .clamp(0.0, 1.0);

        let height = lerp(config.standing_height, config.crouch_height, state.crouch_weight);
        let delta = height - collider.height();
        collider.set_height(height);
        let mut center = collider.center();
        center.y += delta * 0.5;
        collider.set_center(center);

        state.capsule_height = height;
        state.capsule_center_y = center.y;
    }

    fn advance_flag(&mut self, crouch_held: bool, dt: f32) {
        match self.mode {
            CrouchTransitionMode::Continuous => {
                self.crouching = crouch_held;
            }
            CrouchTransitionMode::DelayedUncrouch { delay } => {
                if crouch_held {
                    // Re-pressing crouch discards any pending uncrouch
                    self.crouching = true;
                    self.uncrouch_timer = None;
                } else if self.crouching {
                    let remaining = self.uncrouch_timer.unwrap_or(delay) - dt;
                    if remaining <= 0.0 {
                        self.crouching = false;
                        self.uncrouch_timer = None;
                    } else {
                        self.uncrouch_timer = Some(remaining);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FlatGround;
    use glam::Vec3;

    fn setup() -> (CharacterState, FlatGround, PlayerConfig) {
        let position = Vec3::new(0.0, 1.0, 0.0);
        let state = CharacterState::new(position, 2.0);
        let ground = FlatGround::new(position, 2.0);
        (state, ground, PlayerConfig::default())
    }

    #[test]
    fn test_weight_stays_in_unit_range() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::Continuous);

        // Erratic dt and target sequences must never escape [0, 1]
        let steps = [
            (true, 0.0),
            (true, 10.0),
            (false, 0.5),
            (true, 0.001),
            (false, 100.0),
            (true, 3.0),
        ];
        for (held, dt) in steps {
            crouch.update(&mut state, held, &config, &mut ground, dt);
            assert!((0.0..=1.0).contains(&state.crouch_weight));
        }
    }

    #[test]
    fn test_weight_converges_to_target() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::Continuous);

        for _ in 0..300 {
            crouch.update(&mut state, true, &config, &mut ground, 1.0 / 60.0);
        }
        assert!(state.crouch_weight > 0.99);

        for _ in 0..300 {
            crouch.update(&mut state, false, &config, &mut ground, 1.0 / 60.0);
        }
        assert!(state.crouch_weight < 0.01);
    }

    #[test]
    fn test_capsule_center_shifts_half_height_delta() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::Continuous);

        let height_before = ground.height();
        let center_before = ground.center().y;
        crouch.update(&mut state, true, &config, &mut ground, 1.0 / 30.0);
        let delta = ground.height() - height_before;

        assert!(delta < 0.0);
        assert!((ground.center().y - (center_before + delta * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_height_bounded_by_config() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::Continuous);

        for _ in 0..500 {
            crouch.update(&mut state, true, &config, &mut ground, 0.05);
            assert!(state.capsule_height >= config.crouch_height - 1e-5);
            assert!(state.capsule_height <= config.standing_height + 1e-5);
        }
        assert!((state.capsule_height - config.crouch_height).abs() < 1e-3);
    }

    #[test]
    fn test_delayed_uncrouch_waits_out_the_delay() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::DelayedUncrouch { delay: 0.3 });

        crouch.update(&mut state, true, &config, &mut ground, 0.1);
        assert!(crouch.is_crouching());
        assert_eq!(state.crouch_weight, 1.0);

        // Released: still crouched until 0.3 s have elapsed
        crouch.update(&mut state, false, &config, &mut ground, 0.1);
        assert!(crouch.is_crouching());
        crouch.update(&mut state, false, &config, &mut ground, 0.1);
        assert!(crouch.is_crouching());
        crouch.update(&mut state, false, &config, &mut ground, 0.15);
        assert!(!crouch.is_crouching());
        assert_eq!(state.crouch_weight, 0.0);
    }

    #[test]
    fn test_delayed_uncrouch_discarded_on_repress() {
        let (mut state, mut ground, config) = setup();
        let mut crouch = CrouchBlend::new(CrouchTransitionMode::DelayedUncrouch { delay: 0.3 });

        crouch.update(&mut state, true, &config, &mut ground, 0.1);
        crouch.update(&mut state, false, &config, &mut ground, 0.2);
        // Re-press just before the delay would fire
        crouch.update(&mut state, true, &config, &mut ground, 0.1);

        // A fresh release starts the full delay over
        crouch.update(&mut state, false, &config, &mut ground, 0.2);
        assert!(crouch.is_crouching());
        crouch.update(&mut state, false, &config, &mut ground, 0.2);
        assert!(!crouch.is_crouching());
    }
}
