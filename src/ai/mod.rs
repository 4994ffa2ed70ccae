//! Agent behavior and navigation module
//!
//! Provides the three-state behavior machine, walkable-surface queries, and
//! destination-driven navigation.

mod behavior;
mod controller;
mod nav;

pub use behavior::{classify, AttackStage, Behavior};
pub use controller::{EnemyController, TargetPoint, TargetProvider};
pub use nav::{NavGrid, Navigator, SteeringNavigator, SurfaceQuery};
