//! Simulation harness
//!
//! Owns the physics world, the navigation grid, and the actors, and runs
//! one update pass per tick. Each actor's state is touched exactly once per
//! tick, by its own controller.

use glam::{Vec2, Vec3};
use hecs::Entity;

use crate::ai::{
    EnemyController, NavGrid, Navigator, SteeringNavigator, TargetPoint, TargetProvider,
};
use crate::animation::ParameterBuffer;
use crate::core::{SimConfig, Time};
use crate::input::InputSample;
use crate::physics::{CharacterBodyState, Physics};
use crate::player::PlayerController;

/// Player actor components
pub struct PlayerActor {
    /// Locomotion controller
    pub controller: PlayerController,
    /// Collision capsule state
    pub body: CharacterBodyState,
    /// Animation parameter staging buffer
    pub animator: ParameterBuffer,
}

/// Enemy actor components
pub struct EnemyActor {
    /// Behavior machine
    pub controller: EnemyController,
    /// Locomotion collaborator
    pub nav: SteeringNavigator,
    /// Animation parameter staging buffer
    pub animator: ParameterBuffer,
}

/// Headless simulation of one player and any number of enemy agents
pub struct Simulation {
    /// Actor storage
    pub world: hecs::World,
    /// Collision world
    pub physics: Physics,
    /// Walkable surface for agent navigation
    pub nav_grid: NavGrid,
    /// Tick bookkeeping
    pub time: Time,
    config: SimConfig,
}

impl Simulation {
    /// Create a simulation with a flat ground slab and an open nav grid
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        let mut physics = Physics::new();
        physics.add_ground_plane(0.0);

        let mut nav_grid = NavGrid::new(64, 64, 1.0);
        nav_grid.set_origin(Vec2::new(-32.0, -32.0));

        Self {
            world: hecs::World::new(),
            physics,
            nav_grid,
            time: Time::new(),
            config,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Spawn the player rig at a position (body origin at capsule center)
    pub fn spawn_player(&mut self, position: Vec3) -> Entity {
        let config = self.config.player.clone();
        let body =
            self.physics
                .spawn_character(position, config.standing_height, config.capsule_radius);
        let controller = PlayerController::new(config, position);
        log::info!("spawned player at {position:?}");

        self.world.spawn((PlayerActor {
            controller,
            body,
            animator: ParameterBuffer::new(),
        },))
    }

    /// Spawn an enemy agent with a seeded wander generator
    pub fn spawn_enemy(&mut self, position: Vec3, seed: u64) -> Entity {
        let controller = EnemyController::new(self.config.agent.clone(), seed);
        let nav = SteeringNavigator::new(position);
        log::info!("spawned enemy at {position:?}");

        self.world.spawn((EnemyActor {
            controller,
            nav,
            animator: ParameterBuffer::new(),
        },))
    }

    /// Advance the simulation one tick.
    ///
    /// The player updates first; every enemy then reads the player's
    /// post-update position as its target. With no player spawned, enemy
    /// updates skip for the tick (no target).
    pub fn update(&mut self, dt: f32, input: &InputSample) {
        self.time.advance(dt);

        let mut target = None;
        for (_, actor) in self.world.query_mut::<&mut PlayerActor>() {
            let PlayerActor {
                controller,
                body,
                animator,
            } = actor;
            let mut view = self.physics.character_view(body);
            controller.update(dt, input, &mut view, Some(animator));
            target = Some(TargetPoint {
                position: controller.state.position,
                forward: controller.state.forward(),
            });
        }

        for (_, actor) in self.world.query_mut::<&mut EnemyActor>() {
            let EnemyActor {
                controller,
                nav,
                animator,
            } = actor;
            nav.set_on_surface(self.nav_grid.contains(nav.position()));
            controller.update(
                dt,
                nav,
                target.as_ref().map(|t| t as &dyn TargetProvider),
                &self.nav_grid,
                Some(animator),
            );
            nav.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Behavior;
    use crate::animation::param;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_player_walks_forward() {
        let mut sim = Simulation::new(SimConfig::default());
        let player = sim.spawn_player(Vec3::new(0.0, 1.0, 0.0));

        let input = InputSample::with_axes(1.0, 0.0);
        for _ in 0..120 {
            sim.update(DT, &input);
        }

        let actor = sim.world.get::<&PlayerActor>(player).unwrap();
        // Two seconds of walking along -Z
        assert!(actor.controller.state.position.z < -8.0);
        assert!(actor.controller.state.grounded);
    }

    #[test]
    fn test_enemy_closes_in_and_attacks() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.spawn_player(Vec3::new(0.0, 1.0, 0.0));
        let enemy = sim.spawn_enemy(Vec3::new(8.0, 0.0, 0.0), 7);

        // Within detection range from the start: chase immediately
        sim.update(DT, &InputSample::default());
        {
            let actor = sim.world.get::<&EnemyActor>(enemy).unwrap();
            assert_eq!(actor.controller.behavior(), Behavior::Chase);
        }

        // Running at the stationary player eventually enters attack range
        for _ in 0..600 {
            sim.update(DT, &InputSample::default());
        }
        let actor = sim.world.get::<&EnemyActor>(enemy).unwrap();
        assert_eq!(actor.controller.behavior(), Behavior::Attack);
        assert_eq!(actor.animator.bool_param(param::IS_ATTACKING), Some(true));
        assert_eq!(actor.animator.int_param(param::ATTACK_STAGE), Some(2));
    }

    #[test]
    fn test_enemy_wanders_when_player_is_far() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.spawn_player(Vec3::new(30.0, 1.0, 30.0));
        let enemy = sim.spawn_enemy(Vec3::new(-20.0, 0.0, -20.0), 3);

        for _ in 0..600 {
            sim.update(DT, &InputSample::default());
        }

        let actor = sim.world.get::<&EnemyActor>(enemy).unwrap();
        assert_eq!(actor.controller.behavior(), Behavior::Wander);
        // Ten seconds of wandering moved the agent somewhere
        assert!(actor.nav.position().distance(Vec3::new(-20.0, 0.0, -20.0)) > 0.5);
    }

    #[test]
    fn test_no_player_means_no_enemy_updates() {
        let mut sim = Simulation::new(SimConfig::default());
        let enemy = sim.spawn_enemy(Vec3::new(0.0, 0.0, 0.0), 1);

        for _ in 0..60 {
            sim.update(DT, &InputSample::default());
        }

        let actor = sim.world.get::<&EnemyActor>(enemy).unwrap();
        assert!(actor.animator.is_empty());
        assert_eq!(actor.nav.position(), Vec3::ZERO);
    }

    #[test]
    fn test_fault_in_one_actor_does_not_stall_others() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.spawn_player(Vec3::new(0.0, 1.0, 0.0));
        // Off the nav grid: this agent's updates are skipped
        let stranded = sim.spawn_enemy(Vec3::new(500.0, 0.0, 0.0), 2);
        let active = sim.spawn_enemy(Vec3::new(6.0, 0.0, 0.0), 4);

        for _ in 0..60 {
            sim.update(DT, &InputSample::default());
        }

        let stuck = sim.world.get::<&EnemyActor>(stranded).unwrap();
        assert!(stuck.animator.is_empty());
        let chasing = sim.world.get::<&EnemyActor>(active).unwrap();
        assert_eq!(chasing.controller.behavior(), Behavior::Attack);
    }
}
