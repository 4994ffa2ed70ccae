//! Enemy behavior controller

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::animation::{self, AgentChannels, AnimationSink};
use crate::core::AgentConfig;

use super::behavior::{classify, AttackStage, Behavior};
use super::nav::{Navigator, SurfaceQuery};

/// Position and facing of the actor an agent tracks
pub trait TargetProvider {
    /// World position of the target
    fn position(&self) -> Vec3;

    /// Horizontal facing direction of the target
    fn forward(&self) -> Vec3;
}

/// Plain target snapshot
#[derive(Debug, Clone, Copy)]
pub struct TargetPoint {
    /// World position
    pub position: Vec3,
    /// Facing direction
    pub forward: Vec3,
}

impl TargetProvider for TargetPoint {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }
}

/// Three-state behavior machine driving one enemy agent.
///
/// The behavior is re-classified from the target distance every frame; the
/// machine only persists the wander timer and the attack engagement state.
/// The windup-to-strike delay is an explicit countdown, armed on entering
/// Attack and discarded on leaving it, so a stale timer can never fire into
/// a later engagement.
pub struct EnemyController {
    config: AgentConfig,
    behavior: Behavior,
    wander_timer: f32,
    attack_stage: AttackStage,
    entered_attack: bool,
    strike_countdown: Option<f32>,
    rng: SmallRng,
}

impl EnemyController {
    /// Create a wandering agent with a seeded destination generator
    #[must_use]
    pub fn new(config: AgentConfig, seed: u64) -> Self {
        Self {
            config,
            behavior: Behavior::Wander,
            wander_timer: 0.0,
            attack_stage: AttackStage::None,
            entered_attack: false,
            strike_countdown: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Current behavior
    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Current attack sub-state
    #[must_use]
    pub fn attack_stage(&self) -> AttackStage {
        self.attack_stage
    }

    /// Active tuning values
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// One behavior tick.
    ///
    /// Skipped entirely (no state mutation, no animation writes) when the
    /// target is absent or the agent is off the navigable surface.
    pub fn update(
        &mut self,
        dt: f32,
        nav: &mut dyn Navigator,
        target: Option<&dyn TargetProvider>,
        surface: &dyn SurfaceQuery,
        sink: Option<&mut dyn AnimationSink>,
    ) {
        let Some(target) = target else {
            return;
        };
        if !nav.is_on_surface() {
            return;
        }

        let position = nav.position();
        let distance = position.distance(target.position());
        let next = classify(distance, self.config.attack_range, self.config.detection_range);

        if next != self.behavior {
            log::debug!(
                "behavior {:?} -> {:?} at distance {:.2}",
                self.behavior,
                next,
                distance
            );
        }
        if self.behavior == Behavior::Attack && next != Behavior::Attack {
            self.exit_attack();
        }
        self.behavior = next;

        // Tick the armed countdown before the state body so the entry frame
        // always reports Windup.
        if self.behavior == Behavior::Attack && self.entered_attack {
            if let Some(remaining) = self.strike_countdown.take() {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.attack_stage = AttackStage::Strike;
                } else {
                    self.strike_countdown = Some(remaining);
                }
            }
        }

        match self.behavior {
            Behavior::Wander => self.wander(dt, nav, surface),
            Behavior::Chase => {
                nav.set_speed(self.config.run_speed);
                nav.set_destination(target.position());
            }
            Behavior::Attack => self.attack(position, nav, target),
        }

        animation::sync_agent(
            sink,
            &AgentChannels {
                detected: matches!(self.behavior, Behavior::Chase | Behavior::Attack),
                running: self.behavior == Behavior::Chase,
                attacking: self.behavior == Behavior::Attack,
                attack_stage: self.attack_stage.index(),
                speed: nav.velocity().length(),
            },
        );
    }

    fn wander(&mut self, dt: f32, nav: &mut dyn Navigator, surface: &dyn SurfaceQuery) {
        nav.set_speed(self.config.walk_speed);
        self.wander_timer += dt;
        if self.wander_timer >= self.config.wander_interval {
            let origin = nav.position();
            let raw = origin + random_in_sphere(&mut self.rng) * self.config.wander_radius;
            let destination = surface
                .sample(raw, self.config.wander_radius, u32::MAX)
                .unwrap_or(raw);
            log::trace!("wander destination {destination:?}");
            nav.set_destination(destination);
            self.wander_timer = 0.0;
        }
    }

    fn attack(&mut self, position: Vec3, nav: &mut dyn Navigator, target: &dyn TargetProvider) {
        if self.entered_attack {
            // Hold position; the approach destination was issued on entry
            nav.set_destination(position);
            return;
        }

        // First frame of the engagement: approach point in front of the
        // target, pinned to the agent's own height.
        let mut approach = target.position() + target.forward() * self.config.safe_distance;
        approach.y = position.y;
        nav.set_destination(approach);
        self.attack_stage = AttackStage::Windup;
        self.strike_countdown = Some(self.config.windup_duration);
        self.entered_attack = true;
    }

    fn exit_attack(&mut self) {
        self.entered_attack = false;
        self.attack_stage = AttackStage::None;
        self.strike_countdown = None;
    }
}

/// Uniform random point in the unit sphere, rejection sampled
fn random_in_sphere(rng: &mut SmallRng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
