//! First-person arm pose

use glam::Vec3;

use crate::core::PlayerConfig;
use crate::math::blend_vec3;

/// Interpolated arm transform driven by the locomotion state.
///
/// The base transform is captured once at construction and never
/// reassigned; offsets from the pose table are applied on top of it. Scale
/// follows the shared crouch weight directly so it can never desync from
/// the capsule.
#[derive(Debug, Clone)]
pub struct ArmPose {
    base_position: Vec3,
    base_scale: Vec3,
    position: Vec3,
    scale: Vec3,
}

impl ArmPose {
    /// Capture the base transform and start at rest
    #[must_use]
    pub fn new(base_position: Vec3, base_scale: Vec3) -> Self {
        Self {
            base_position,
            base_scale,
            position: base_position,
            scale: base_scale,
        }
    }

    /// Current arm position in actor-local space
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current arm scale
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Base position captured at spawn
    #[must_use]
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    /// Base scale captured at spawn
    #[must_use]
    pub fn base_scale(&self) -> Vec3 {
        self.base_scale
    }

    /// Advance the pose toward the offset selected for this frame
    pub fn update(
        &mut self,
        crouching: bool,
        walking: bool,
        running: bool,
        crouch_weight: f32,
        config: &PlayerConfig,
        dt: f32,
    ) {
        let arms = &config.arms;
        let offset = if crouching {
            if walking {
                arms.offset_crouch_walk
            } else {
                arms.offset_crouch_idle
            }
        } else if running && walking {
            arms.offset_run
        } else if walking {
            arms.offset_walk
        } else {
            arms.offset_idle
        };

        let rate = if crouch_weight >= 0.5 {
            config.transition_down_rate
        } else {
            config.transition_up_rate
        };
        self.position = blend_vec3(self.position, self.base_position + offset, rate, dt);
        self.scale = self.base_scale.lerp(arms.crouch_scale, crouch_weight);
    }
}
