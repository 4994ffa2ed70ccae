//! Physics and collision module
//!
//! Kinematic character movement built on rapier3d.

mod character;
mod world;

pub use character::{CharacterCollider, CharacterView, FlatGround};
pub use world::{CharacterBodyState, Physics};
