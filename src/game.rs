//! Scene setup for the demo arena.
//!
//! Builds the starting world: one player in the middle of the render area and
//! a few solid training dummies around it. Attack templates come from the
//! configured JSON file when there is one; otherwise the player keeps its
//! built-in set (upward slash only).
use std::path::Path;

use bevy_ecs::prelude::Entity;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::attack::AttackTemplateSet;
use crate::components::player::{Player, PlayerBundle};
use crate::resources::gameconfig::GameConfig;
use crate::simulation::Simulation;

const DUMMY_HALF_EXTENT: f32 = 16.0;
const DUMMY_HEALTH: i32 = 3;
/// Dummy placement relative to the player, in pixels.
const DUMMY_OFFSETS: [(f32, f32); 4] = [(0.0, -96.0), (0.0, 96.0), (-128.0, 0.0), (128.0, 0.0)];

/// Load the attack set from `path`, falling back to the default set.
pub fn load_attacks(path: Option<&Path>) -> AttackTemplateSet {
    let Some(path) = path else {
        return AttackTemplateSet::default();
    };
    match AttackTemplateSet::load_from_file(path) {
        Ok(set) => set,
        Err(e) => {
            warn!("{}; using the default attack set", e);
            AttackTemplateSet::default()
        }
    }
}

/// Populate `sim` with the arena. Returns the player entity.
pub fn setup(sim: &mut Simulation, config: &GameConfig, attacks: AttackTemplateSet) -> Entity {
    let center = Vector2::new(
        config.render_width as f32 / 2.0,
        config.render_height as f32 / 2.0,
    );

    let player = sim.spawn_actor(
        PlayerBundle::new(center).with_player(Player::default().with_attacks(attacks)),
    );
    for (dx, dy) in DUMMY_OFFSETS {
        sim.spawn_solid(
            center + Vector2::new(dx, dy),
            DUMMY_HALF_EXTENT,
            DUMMY_HEALTH,
        );
    }

    info!(
        "Scene ready: player {:?} at ({:.0}, {:.0}) with {} dummies",
        player,
        center.x,
        center.y,
        DUMMY_OFFSETS.len()
    );
    player
}
