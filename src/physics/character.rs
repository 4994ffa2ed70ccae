//! Collision-move primitive for character capsules

use glam::Vec3;

use super::world::{CharacterBodyState, Physics};

/// Collision contract required by the locomotion controllers.
///
/// Mirrors a capsule-based character mover: displacement in, post-move
/// grounded flag out, with a resizable capsule for crouching. The capsule
/// `center` is an offset from the body origin; shifting it by half of a
/// height change keeps the feet planted through a resize.
pub trait CharacterCollider {
    /// Apply a displacement, sliding along geometry.
    /// Returns the grounded flag after the move.
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> bool;

    /// World position of the body origin
    fn position(&self) -> Vec3;

    /// Teleport the body origin
    fn set_position(&mut self, position: Vec3);

    /// Grounded flag from the last move
    fn is_grounded(&self) -> bool;

    /// Total capsule height
    fn height(&self) -> f32;

    /// Resize the capsule, keeping its radius
    fn set_height(&mut self, height: f32);

    /// Capsule offset from the body origin
    fn center(&self) -> Vec3;

    /// Move the capsule relative to the body origin
    fn set_center(&mut self, center: Vec3);
}

/// rapier-backed mover borrowing the physics world for one update
pub struct CharacterView<'a> {
    physics: &'a mut Physics,
    state: &'a mut CharacterBodyState,
}

impl<'a> CharacterView<'a> {
    /// Borrow a character from the world; prefer `Physics::character_view`
    pub fn new(physics: &'a mut Physics, state: &'a mut CharacterBodyState) -> Self {
        Self { physics, state }
    }
}

impl CharacterCollider for CharacterView<'_> {
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> bool {
        self.physics.move_character(self.state, displacement, dt)
    }

    fn position(&self) -> Vec3 {
        self.physics.character_position(self.state)
    }

    fn set_position(&mut self, position: Vec3) {
        self.physics.set_character_position(self.state, position);
    }

    fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    fn height(&self) -> f32 {
        self.state.height
    }

    fn set_height(&mut self, height: f32) {
        self.physics.resize_character(self.state, height);
    }

    fn center(&self) -> Vec3 {
        self.state.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.physics.set_character_center(self.state, center);
    }
}

/// Infinite flat ground at a fixed height with no lateral obstacles.
///
/// A pure stand-in for the rapier mover, used by headless tests and demos.
#[derive(Debug, Clone)]
pub struct FlatGround {
    position: Vec3,
    height: f32,
    center: Vec3,
    grounded: bool,
    surface_y: f32,
}

const CONTACT_EPSILON: f32 = 1e-4;

impl FlatGround {
    /// Create a capsule over flat ground at height zero
    #[must_use]
    pub fn new(position: Vec3, height: f32) -> Self {
        Self::with_surface(position, height, 0.0)
    }

    /// Create a capsule over flat ground at a custom surface height
    #[must_use]
    pub fn with_surface(position: Vec3, height: f32, surface_y: f32) -> Self {
        let mut ground = Self {
            position,
            height,
            center: Vec3::ZERO,
            grounded: false,
            surface_y,
        };
        ground.grounded = ground.bottom() <= surface_y + CONTACT_EPSILON;
        ground
    }

    fn bottom(&self) -> f32 {
        self.position.y + self.center.y - self.height * 0.5
    }
}

impl CharacterCollider for FlatGround {
    fn move_by(&mut self, displacement: Vec3, _dt: f32) -> bool {
        self.position += displacement;

        let bottom = self.bottom();
        if bottom <= self.surface_y + CONTACT_EPSILON {
            self.position.y += self.surface_y - bottom;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_clamps_to_surface() {
        // Capsule of height 2 resting with its bottom at y = 0
        let mut ground = FlatGround::new(Vec3::new(0.0, 1.0, 0.0), 2.0);
        assert!(ground.is_grounded());

        let grounded = ground.move_by(Vec3::new(0.0, -5.0, 0.0), 1.0 / 60.0);
        assert!(grounded);
        assert!((ground.position().y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_flat_ground_airborne() {
        let mut ground = FlatGround::new(Vec3::new(0.0, 1.0, 0.0), 2.0);

        let grounded = ground.move_by(Vec3::new(0.0, 2.0, 0.0), 1.0 / 60.0);
        assert!(!grounded);
        assert!((ground.position().y - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_flat_ground_horizontal_motion_free() {
        let mut ground = FlatGround::new(Vec3::new(0.0, 1.0, 0.0), 2.0);
        ground.move_by(Vec3::new(1.0, 0.0, -2.0), 1.0 / 60.0);

        assert!((ground.position() - Vec3::new(1.0, 1.0, -2.0)).length() < 1e-3);
    }
}
