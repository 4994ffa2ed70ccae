//! Kinematic character physics using rapier3d
//!
//! The world holds fixed level geometry and one kinematic capsule per
//! character. Characters move through `move_character`, which slides the
//! capsule along obstacles and reports the post-move grounded flag.

use glam::Vec3;
use rapier3d::control::{CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

/// Convert a glam vector to a rapier vector
fn to_rapier(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

/// Convert a rapier vector to a glam vector
fn to_glam(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Capsule cylinder half-height for a total capsule height and radius
fn capsule_half_height(height: f32, radius: f32) -> f32 {
    (height * 0.5 - radius).max(0.0)
}

/// Persistent collision state for one character capsule
#[derive(Debug, Clone, Copy)]
pub struct CharacterBodyState {
    /// Kinematic body backing the capsule
    pub body: RigidBodyHandle,
    /// Capsule collider attached to the body
    pub collider: ColliderHandle,
    /// Grounded flag from the last move
    pub grounded: bool,
    /// Current total capsule height
    pub height: f32,
    /// Capsule radius, unchanged by resizing
    pub radius: f32,
    /// Capsule offset from the body origin
    pub center: Vec3,
}

/// Physics world manager
pub struct Physics {
    /// Rigid body set
    bodies: RigidBodySet,
    /// Collider set
    colliders: ColliderSet,
    /// Query pipeline for shape casting
    query_pipeline: QueryPipeline,
    /// Shared character controller settings
    controller: KinematicCharacterController,
}

impl Physics {
    /// Create an empty physics world
    #[must_use]
    pub fn new() -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.offset = CharacterLength::Absolute(0.01);
        controller.snap_to_ground = Some(CharacterLength::Absolute(0.2));

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            controller,
        }
    }

    /// Add a fixed cuboid obstacle
    pub fn add_static_cuboid(&mut self, position: Vec3, half_extents: Vec3) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed().translation(to_rapier(position)).build();
        let body = self.bodies.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.colliders.insert_with_parent(collider, body, &mut self.bodies)
    }

    /// Add a large ground slab whose top surface sits at `surface_y`
    pub fn add_ground_plane(&mut self, surface_y: f32) -> ColliderHandle {
        self.add_static_cuboid(
            Vec3::new(0.0, surface_y - 0.1, 0.0),
            Vec3::new(100.0, 0.1, 100.0),
        )
    }

    /// Create a kinematic character capsule centered on the body origin
    pub fn spawn_character(&mut self, position: Vec3, height: f32, radius: f32) -> CharacterBodyState {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_rapier(position))
            .build();
        let body = self.bodies.insert(body);
        let collider =
            ColliderBuilder::capsule_y(capsule_half_height(height, radius), radius).build();
        let collider = self.colliders.insert_with_parent(collider, body, &mut self.bodies);

        CharacterBodyState {
            body,
            collider,
            grounded: false,
            height,
            radius,
            center: Vec3::ZERO,
        }
    }

    /// Move a character capsule by a displacement, sliding along obstacles.
    ///
    /// Returns the grounded flag reported by the collision resolution; the
    /// flag is also stored on the state for the next frame.
    pub fn move_character(
        &mut self,
        state: &mut CharacterBodyState,
        displacement: Vec3,
        dt: f32,
    ) -> bool {
        let Some(body) = self.bodies.get(state.body) else {
            return state.grounded;
        };
        let position = *body.translation();

        // No pipeline step runs here, so body moves from previous frames
        // must be pushed down to the collider set by hand before querying.
        self.bodies
            .propagate_modified_body_positions_to_colliders(&mut self.colliders);
        self.query_pipeline.update(&self.colliders);
        let movement = {
            let Some(collider) = self.colliders.get(state.collider) else {
                return state.grounded;
            };
            let capsule_pos = Isometry::translation(
                position.x + state.center.x,
                position.y + state.center.y,
                position.z + state.center.z,
            );
            self.controller.move_shape(
                dt,
                &self.bodies,
                &self.colliders,
                &self.query_pipeline,
                collider.shape(),
                &capsule_pos,
                to_rapier(displacement),
                QueryFilter::default().exclude_rigid_body(state.body),
                |_| {},
            )
        };

        if let Some(body) = self.bodies.get_mut(state.body) {
            body.set_translation(position + movement.translation, true);
        }
        state.grounded = movement.grounded;
        state.grounded
    }

    /// Current world position of a character's body origin
    #[must_use]
    pub fn character_position(&self, state: &CharacterBodyState) -> Vec3 {
        self.bodies
            .get(state.body)
            .map_or(Vec3::ZERO, |body| to_glam(body.translation()))
    }

    /// Teleport a character's body origin
    pub fn set_character_position(&mut self, state: &CharacterBodyState, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(state.body) {
            body.set_translation(to_rapier(position), true);
        }
    }

    /// Resize a character capsule in place, keeping its radius
    pub fn resize_character(&mut self, state: &mut CharacterBodyState, height: f32) {
        let height = height.max(state.radius * 2.0);
        if let Some(collider) = self.colliders.get_mut(state.collider) {
            collider.set_shape(SharedShape::capsule_y(
                capsule_half_height(height, state.radius),
                state.radius,
            ));
        }
        state.height = height;
    }

    /// Reposition a character capsule relative to its body origin
    pub fn set_character_center(&mut self, state: &mut CharacterBodyState, center: Vec3) {
        if let Some(collider) = self.colliders.get_mut(state.collider) {
            collider.set_position_wrt_parent(Isometry::translation(center.x, center.y, center.z));
        }
        state.center = center;
    }

    /// Borrow a character as the collision-move primitive for one update
    pub fn character_view<'a>(
        &'a mut self,
        state: &'a mut CharacterBodyState,
    ) -> super::character::CharacterView<'a> {
        super::character::CharacterView::new(self, state)
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_lands_on_ground() {
        let mut physics = Physics::new();
        physics.add_ground_plane(0.0);

        // Capsule of height 2 centered on the body: spawn just above contact
        let mut state = physics.spawn_character(Vec3::new(0.0, 1.2, 0.0), 2.0, 0.3);
        let dt = 1.0 / 60.0;

        let mut grounded = false;
        for _ in 0..60 {
            grounded = physics.move_character(&mut state, Vec3::new(0.0, -0.1, 0.0), dt);
        }

        assert!(grounded);
        let position = physics.character_position(&state);
        // Resting with the capsule bottom on the slab top
        assert!((position.y - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_airborne_character_not_grounded() {
        let mut physics = Physics::new();
        physics.add_ground_plane(0.0);

        let mut state = physics.spawn_character(Vec3::new(0.0, 10.0, 0.0), 2.0, 0.3);
        let grounded = physics.move_character(&mut state, Vec3::new(0.0, -0.05, 0.0), 1.0 / 60.0);

        assert!(!grounded);
    }

    #[test]
    fn test_wall_blocks_horizontal_motion() {
        let mut physics = Physics::new();
        physics.add_ground_plane(0.0);
        physics.add_static_cuboid(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.2, 2.0, 2.0));

        let mut state = physics.spawn_character(Vec3::new(0.0, 1.0, 0.0), 2.0, 0.3);
        let dt = 1.0 / 60.0;
        for _ in 0..120 {
            physics.move_character(&mut state, Vec3::new(0.05, -0.01, 0.0), dt);
        }

        // Stopped at the wall face instead of tunneling through
        let position = physics.character_position(&state);
        assert!(position.x < 1.6);
    }

    #[test]
    fn test_resize_keeps_radius() {
        let mut physics = Physics::new();
        let mut state = physics.spawn_character(Vec3::new(0.0, 1.0, 0.0), 2.0, 0.3);

        physics.resize_character(&mut state, 1.0);
        assert_eq!(state.height, 1.0);
        assert_eq!(state.radius, 0.3);

        // Heights below the sphere pair are clamped
        physics.resize_character(&mut state, 0.1);
        assert_eq!(state.height, 0.6);
    }
}
