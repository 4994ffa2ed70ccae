//! Headless demo driving the simulation
//!
//! Spawns one player and one enemy on flat ground, scripts some input, and
//! runs a fixed-timestep loop. Run with `RUST_LOG=debug` to watch the
//! behavior transitions.

use gameplay::prelude::*;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load_ron(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                return;
            }
        },
        None => SimConfig::default(),
    };

    log::info!("starting simulation");
    let mut sim = Simulation::new(config);
    let player = sim.spawn_player(Vec3::new(0.0, 1.0, 0.0));
    let enemy = sim.spawn_enemy(Vec3::new(14.0, 0.0, 0.0), 7);

    let dt = 1.0 / 60.0;
    for tick in 0..900 {
        // Walk forward for five seconds, then crouch in place
        let input = if tick < 300 {
            InputSample::with_axes(1.0, 0.0)
        } else {
            InputSample {
                crouch: true,
                ..InputSample::default()
            }
        };
        sim.update(dt, &input);
    }

    if let Ok(actor) = sim.world.get::<&PlayerActor>(player) {
        log::info!(
            "player finished at {:?} (crouch weight {:.2})",
            actor.controller.state.position,
            actor.controller.state.crouch_weight
        );
    }
    if let Ok(actor) = sim.world.get::<&EnemyActor>(enemy) {
        log::info!(
            "enemy finished at {:?} in {:?}",
            actor.nav.position(),
            actor.controller.behavior()
        );
    }
}
