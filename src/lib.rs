//! A character and agent simulation core built in Rust
//!
//! This crate provides:
//! - First-person locomotion with crouch blending and mouse look
//! - Kinematic character collision with rapier3d
//! - A three-state enemy behavior machine (wander / chase / attack)
//! - Animation parameter synchronization for external animators

pub mod ai;
pub mod animation;
pub mod core;
pub mod input;
pub mod math;
pub mod physics;
pub mod player;
pub mod sim;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use rapier3d;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{
        AttackStage, Behavior, EnemyController, NavGrid, Navigator, SteeringNavigator,
        SurfaceQuery, TargetPoint, TargetProvider,
    };
    pub use crate::animation::{AnimationSink, ParameterBuffer};
    pub use crate::core::{AgentConfig, CrouchTransitionMode, PlayerConfig, SimConfig, Time};
    pub use crate::input::{InputSample, InputSampler, KeyBindings};
    pub use crate::physics::{CharacterCollider, FlatGround, Physics};
    pub use crate::player::{CharacterState, Health, PlayerController};
    pub use crate::sim::{EnemyActor, PlayerActor, Simulation};
    pub use glam::{Quat, Vec2, Vec3};
}
