//! Player controller orchestration

use glam::Vec3;

use crate::animation::{self, AnimationSink, PlayerChannels};
use crate::core::PlayerConfig;
use crate::input::InputSample;
use crate::math::yaw_basis;
use crate::physics::CharacterCollider;

use super::arms::ArmPose;
use super::crouch::CrouchBlend;
use super::health::Health;
use super::look::{update_look, CameraRig};
use super::motion::integrate_motion;

/// Per-frame locomotion state for the player rig.
///
/// Owned exclusively by one `PlayerController` and mutated once per tick.
#[derive(Debug, Clone, Copy)]
pub struct CharacterState {
    /// World position of the body origin
    pub position: Vec3,
    /// Velocity applied on the last tick
    pub velocity: Vec3,
    /// Grounded flag from the last collision move
    pub grounded: bool,
    /// Current capsule height
    pub capsule_height: f32,
    /// Vertical capsule offset from the body origin
    pub capsule_center_y: f32,
    /// Smoothed crouch weight in [0, 1]
    pub crouch_weight: f32,
    /// Accumulated body yaw in radians, unclamped
    pub yaw: f32,
    /// Camera pitch in radians, clamped
    pub pitch: f32,
}

impl CharacterState {
    /// State at rest at a position with a standing capsule
    #[must_use]
    pub fn new(position: Vec3, capsule_height: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            capsule_height,
            capsule_center_y: 0.0,
            crouch_weight: 0.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Horizontal facing direction derived from yaw
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        yaw_basis(self.yaw).0
    }
}

/// Drives one player actor each tick: motion, crouch, look, arms, and
/// animation parameter sync, in that order.
///
/// Collaborators are injected per update; nothing is discovered at runtime.
pub struct PlayerController {
    config: PlayerConfig,
    /// Locomotion state, readable by collaborators between ticks
    pub state: CharacterState,
    crouch: CrouchBlend,
    camera: CameraRig,
    arms: Option<ArmPose>,
    /// Health pool (damage and healing arrive from outside the tick)
    pub health: Health,
}

impl PlayerController {
    /// Create a controller standing at `position`
    #[must_use]
    pub fn new(config: PlayerConfig, position: Vec3) -> Self {
        let state = CharacterState::new(position, config.standing_height);
        let crouch = CrouchBlend::new(config.crouch_transition);
        let camera = CameraRig::new(config.eye_offset);
        let arms = config
            .has_arms
            .then(|| ArmPose::new(config.arms.base_position, config.arms.base_scale));
        let health = Health::new(config.max_health);

        Self {
            config,
            state,
            crouch,
            camera,
            arms,
            health,
        }
    }

    /// Effective crouch flag for the current frame
    #[must_use]
    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    /// Camera rig state
    #[must_use]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Arm pose, present only when the rig carries arms
    #[must_use]
    pub fn arms(&self) -> Option<&ArmPose> {
        self.arms.as_ref()
    }

    /// Active tuning values
    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Advance the rig one tick from an input snapshot.
    ///
    /// A missing animation sink skips only the parameter writes; the rest of
    /// the update always runs.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSample,
        collider: &mut dyn CharacterCollider,
        sink: Option<&mut dyn AnimationSink>,
    ) {
        let walking = input.has_movement();

        integrate_motion(&mut self.state, input, &self.config, collider, dt);
        self.crouch
            .update(&mut self.state, input.crouch, &self.config, collider, dt);
        update_look(&mut self.state, input.look_delta, &self.config);

        let crouching = self.crouch.is_crouching();
        let running = walking && input.run && !crouching;
        self.camera
            .update(&self.state, walking, running, crouching, &self.config, dt);
        if let Some(arms) = &mut self.arms {
            arms.update(
                crouching,
                walking,
                running,
                self.state.crouch_weight,
                &self.config,
                dt,
            );
        }

        if self.config.has_body_animator {
            animation::sync_player(
                sink,
                &PlayerChannels {
                    walking,
                    running,
                    crouching,
                    crouch_weight: self.state.crouch_weight,
                    crouch_layer: self.config.crouch_layer,
                },
            );
        }
    }
}
