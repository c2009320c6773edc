//! Frame-level integration tests for the player and attack systems.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ScheduleBuildSettings;
use raylib::prelude::Vector2;

use scythefall::components::actor::{ActorBundle, ActorKind, CollisionLayers, Health};
use scythefall::components::attack::{Attack, AttackDirection, AttackTemplate, AttackTemplateSet};
use scythefall::components::boxcollider::Rect;
use scythefall::components::mapposition::MapPosition;
use scythefall::components::player::{AttackState, Player, PlayerBundle};
use scythefall::components::rigidbody::RigidBody;
use scythefall::resources::input::{InputAction, InputState};
use scythefall::resources::simconfig::SimConfig;
use scythefall::resources::texturestore::TextureStore;
use scythefall::resources::worldtime::WorldTime;
use scythefall::systems::attack::attack_update;
use scythefall::simulation::Simulation;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn pressed(actions: &[InputAction]) -> InputState {
    InputState::default().with_pressed(actions)
}

fn idle() -> InputState {
    InputState::default()
}

fn position(sim: &Simulation, entity: Entity) -> Vector2 {
    sim.get::<MapPosition>(entity).unwrap().pos
}

fn attacks(sim: &mut Simulation) -> Vec<Entity> {
    let mut query = sim.world_mut().query_filtered::<Entity, With<Attack>>();
    query.iter(sim.world()).collect()
}

fn player_with(sim: &mut Simulation, at: Vector2, attacks: AttackTemplateSet) -> Entity {
    sim.spawn_actor(PlayerBundle::new(at).with_player(Player::default().with_attacks(attacks)))
}

/// Up template with a small hit box that does not reach the attacker.
fn narrow_up() -> AttackTemplateSet {
    let mut set = AttackTemplateSet::empty();
    set.set(
        AttackDirection::Up,
        Some(AttackTemplate {
            hit_box: Rect::new(-8.0, -8.0, 8.0, 8.0),
            ..AttackTemplate::default()
        }),
    );
    set
}

#[test]
fn idle_frame_keeps_player_still() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(&idle(), 1.0);

    let body = *sim.get::<RigidBody>(player).unwrap();
    assert_eq!((body.velocity.x, body.velocity.y), (0.0, 0.0));
    assert!(!body.velocity.x.is_nan() && !body.velocity.y.is_nan());
    let pos = position(&sim, player);
    assert!(approx_eq(pos.x, 100.0) && approx_eq(pos.y, 100.0));
    assert_eq!(sim.get::<Player>(player).unwrap().frame_index, 1);
}

#[test]
fn diagonal_movement_is_normalized() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(&pressed(&[InputAction::Right, InputAction::Down]), 1.0);

    let body = *sim.get::<RigidBody>(player).unwrap();
    assert!(approx_eq(body.velocity.length(), 2.0));
    let pos = position(&sim, player);
    let leg = 2.0 / 2.0_f32.sqrt();
    assert!(approx_eq(pos.x, 100.0 + leg));
    assert!(approx_eq(pos.y, 100.0 + leg));
    // moving right mirrors the sprite
    assert_eq!(sim.get::<Player>(player).unwrap().facing_scale, -1.0);
}

#[test]
fn movement_scales_with_time_scale() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(&pressed(&[InputAction::Left]), 2.5);

    let pos = position(&sim, player);
    assert!(approx_eq(pos.x, 95.0));
    assert_eq!(sim.get::<Player>(player).unwrap().facing_scale, 1.0);
}

#[test]
fn touching_solid_blocks_movement_but_keeps_velocity() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));
    // after a 2px step right the player's box ends exactly at the wall's edge
    let wall = sim.spawn_solid(Vector2::new(142.0, 100.0), 20.0, 5);

    sim.step(&pressed(&[InputAction::Right]), 1.0);

    let pos = position(&sim, player);
    assert!(approx_eq(pos.x, 100.0));
    let body = *sim.get::<RigidBody>(player).unwrap();
    assert!(approx_eq(body.velocity.x, 2.0));
    assert!(approx_eq(position(&sim, wall).x, 142.0));
}

#[test]
fn actors_without_shared_layers_do_not_block() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));
    let ghost = Rect::new(-20.0, -20.0, 20.0, 20.0);
    sim.spawn_actor(ActorBundle::new(
        ActorKind::Neutral,
        Vector2::new(142.0, 100.0),
        ghost,
        ghost,
    ));

    sim.step(&pressed(&[InputAction::Right]), 1.0);

    assert!(approx_eq(position(&sim, player).x, 102.0));
}

#[test]
fn solid_attack_blocks_its_player_on_the_spawn_frame() {
    let mut set = AttackTemplateSet::empty();
    set.set(
        AttackDirection::Up,
        Some(AttackTemplate {
            collider: Rect::new(-20.0, -20.0, 20.0, 20.0),
            layers: CollisionLayers::SOLID,
            ..AttackTemplate::default()
        }),
    );
    let mut sim = Simulation::default();
    let player = player_with(&mut sim, Vector2::new(100.0, 100.0), set);

    // the attack box spans y 48..88, the player's target box y 78..118
    sim.step(&pressed(&[InputAction::Up, InputAction::AttackUp]), 1.0);

    assert_eq!(attacks(&mut sim).len(), 1);
    let pos = position(&sim, player);
    assert!(approx_eq(pos.x, 100.0) && approx_eq(pos.y, 100.0));
    let body = *sim.get::<RigidBody>(player).unwrap();
    assert!(approx_eq(body.velocity.y, -2.0));
}

#[test]
fn layerless_attack_does_not_block_its_player() {
    let mut set = AttackTemplateSet::empty();
    set.set(
        AttackDirection::Up,
        Some(AttackTemplate {
            collider: Rect::new(-20.0, -20.0, 20.0, 20.0),
            ..AttackTemplate::default()
        }),
    );
    let mut sim = Simulation::default();
    let player = player_with(&mut sim, Vector2::new(100.0, 100.0), set);

    sim.step(&pressed(&[InputAction::Up, InputAction::AttackUp]), 1.0);

    assert!(approx_eq(position(&sim, player).y, 98.0));
}

#[test]
fn attack_spawns_at_offset_and_is_visible_immediately() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);

    let spawned = attacks(&mut sim);
    assert_eq!(spawned.len(), 1);
    let attack = spawned[0];
    let pos = position(&sim, attack);
    assert!(approx_eq(pos.x, 100.0) && approx_eq(pos.y, 68.0));
    assert!(sim.actors().contains(&attack));

    let a = sim.get::<Attack>(attack).unwrap();
    // first update is skipped on the spawn frame
    assert_eq!(a.frame_index, 0);
    assert!(approx_eq(a.rotation, -std::f32::consts::FRAC_PI_2));

    let p = sim.get::<Player>(player).unwrap();
    assert!(!p.can_attack);
    assert_eq!(p.attack_direction, AttackDirection::Up);
    assert_eq!(p.attack_frame, 1);
    assert_eq!(p.attack_state(), AttackState::Active);

    sim.step(&idle(), 1.0);
    assert_eq!(sim.get::<Attack>(attack).unwrap().frame_index, 1);
}

#[test]
fn attack_sprite_is_registered_by_setup() {
    let mut sim = Simulation::default();
    sim.spawn_player(Vector2::new(100.0, 100.0));
    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);

    let store = sim.world().resource::<TextureStore>();
    assert!(store.get("sprites/player/reaper.png").is_some());
    assert!(store.get("sprites/weapon/scythe.png").is_some());
    assert!(store.get("sprites/weapon/32slash.png").is_some());
}

#[test]
fn inert_directions_spawn_nothing() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(
        &pressed(&[
            InputAction::AttackDown,
            InputAction::AttackLeft,
            InputAction::AttackRight,
        ]),
        1.0,
    );

    assert!(attacks(&mut sim).is_empty());
    let p = sim.get::<Player>(player).unwrap();
    assert!(p.can_attack);
    assert_eq!(p.attack_direction, AttackDirection::None);
}

#[test]
fn up_wins_over_other_attack_keys() {
    let mut set = AttackTemplateSet::default();
    set.set(AttackDirection::Down, Some(AttackTemplate::default()));
    let mut sim = Simulation::default();
    player_with(&mut sim, Vector2::new(100.0, 100.0), set);

    sim.step(&pressed(&[InputAction::AttackDown, InputAction::AttackUp]), 1.0);

    let spawned = attacks(&mut sim);
    assert_eq!(spawned.len(), 1);
    assert!(approx_eq(position(&sim, spawned[0]).y, 68.0));
}

#[test]
fn cooldown_lasts_length_plus_delay_frames() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));
    let hold = pressed(&[InputAction::AttackUp]);

    // frames 1..=24 are busy, the held key is ignored meanwhile
    for frame in 1..=24 {
        sim.step(&hold, 1.0);
        assert!(!sim.get::<Player>(player).unwrap().can_attack, "frame {frame}");
    }
    sim.step(&hold, 1.0);
    let p = sim.get::<Player>(player).unwrap();
    assert!(p.can_attack);
    assert_eq!(p.attack_state(), AttackState::Idle);

    // only the first attack was spawned, and it expired long ago
    assert!(attacks(&mut sim).is_empty());

    sim.step(&hold, 1.0);
    assert_eq!(attacks(&mut sim).len(), 1);
    assert!(!sim.get::<Player>(player).unwrap().can_attack);
}

#[test]
fn attack_expires_after_its_lifetime() {
    // frame_life 0.5 * frame_skip 8 = 4 updates after the spawn frame
    let mut sim = Simulation::default();
    player_with(&mut sim, Vector2::new(100.0, 100.0), narrow_up());

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);
    let attack = attacks(&mut sim)[0];
    for _ in 0..3 {
        sim.step(&idle(), 1.0);
        assert!(sim.is_alive(attack));
    }
    sim.step(&idle(), 1.0);
    assert!(!sim.is_alive(attack));
    assert!(attacks(&mut sim).is_empty());
}

#[test]
fn expiring_attack_does_not_hit() {
    let mut sim = Simulation::default();
    player_with(&mut sim, Vector2::new(100.0, 100.0), narrow_up());

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);
    for _ in 0..3 {
        sim.step(&idle(), 1.0);
    }
    // appears right on top of the attack during its final frame
    let dummy = sim.spawn_solid(Vector2::new(100.0, 68.0), 4.0, 3);
    sim.step(&idle(), 1.0);

    assert_eq!(*sim.get::<Health>(dummy).unwrap(), Health::new(3));
}

#[test]
fn overlapping_victim_is_damaged_once() {
    let mut sim = Simulation::default();
    let player = player_with(&mut sim, Vector2::new(100.0, 100.0), narrow_up());
    // hit box spans y 60..76; dummy spans y 48..64
    let dummy = sim.spawn_solid(Vector2::new(100.0, 56.0), 8.0, 3);

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);
    let attack = attacks(&mut sim)[0];
    assert_eq!(sim.get::<Health>(dummy).unwrap().current, 3);

    sim.step(&idle(), 1.0);
    assert_eq!(sim.get::<Health>(dummy).unwrap().current, 2);
    assert_eq!(sim.get::<Attack>(attack).unwrap().hit_actors(), &[dummy]);

    for _ in 0..3 {
        sim.step(&idle(), 1.0);
    }
    assert_eq!(sim.get::<Health>(dummy).unwrap().current, 2);
    assert_eq!(sim.get::<Health>(player).unwrap().current, 3);
}

#[test]
fn attack_can_hit_its_own_player() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);
    for _ in 0..4 {
        sim.step(&idle(), 1.0);
    }

    let health = *sim.get::<Health>(player).unwrap();
    assert_eq!(health.current, 2);
    assert!(!health.is_dead());
}

#[test]
fn moving_attack_travels_along_rotation() {
    let mut set = AttackTemplateSet::empty();
    set.set(
        AttackDirection::Right,
        Some(AttackTemplate {
            speed: 4.0,
            ..AttackTemplate::default()
        }),
    );
    let mut sim = Simulation::default();
    player_with(&mut sim, Vector2::new(100.0, 100.0), set);

    sim.step(&pressed(&[InputAction::AttackRight]), 1.0);
    let attack = attacks(&mut sim)[0];
    assert!(approx_eq(position(&sim, attack).x, 132.0));

    sim.step(&idle(), 2.0);
    let pos = position(&sim, attack);
    assert!(approx_eq(pos.x, 140.0));
    assert!(approx_eq(pos.y, 100.0));
}

#[test]
fn freshly_spawned_attack_is_a_target_the_same_frame() {
    let mut sim = Simulation::default();
    let player = sim.spawn_player(Vector2::new(100.0, 100.0));
    // lingering slash above the player's spawn point
    let lingering = AttackTemplate {
        frame_life: 10.0,
        ..AttackTemplate::default()
    }
    .instantiate(0.0, Vector2::new(100.0, 40.0));
    let old = sim.spawn_actor(lingering);

    sim.step(&idle(), 1.0);
    assert_eq!(sim.get::<Attack>(old).unwrap().frame_index, 0);

    sim.step(&pressed(&[InputAction::AttackUp]), 1.0);
    let new = attacks(&mut sim)
        .into_iter()
        .find(|a| *a != old)
        .unwrap();

    assert_eq!(sim.get::<Attack>(old).unwrap().hit_actors(), &[new]);
    assert_eq!(sim.get::<Health>(new).unwrap().current, -2);
    assert_eq!(sim.get::<Health>(player).unwrap().current, 3);
}

#[test]
fn removing_twice_is_harmless() {
    let mut sim = Simulation::default();
    let dummy = sim.spawn_solid(Vector2::new(0.0, 0.0), 8.0, 1);
    assert_eq!(sim.actors().len(), 1);

    assert!(sim.remove_actor(dummy));
    assert!(!sim.remove_actor(dummy));
    assert!(sim.actors().is_empty());

    sim.step(&idle(), 1.0);
}

#[test]
fn load_asset_returns_stable_handles() {
    let mut sim = Simulation::default();
    let a = sim.load_asset("sprites/weapon/32slash.png");
    let b = sim.load_asset("sprites/weapon/32slash.png");
    let c = sim.load_asset("sprites/player/reaper.png");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn attack_expiring_earlier_in_the_frame_is_not_hit() {
    let mut sim = Simulation::default();
    // one-update lifetime: 0.125 * frame_skip 8 = 1 frame
    let short = sim.spawn_actor(
        AttackTemplate {
            frame_life: 0.125,
            ..AttackTemplate::default()
        }
        .instantiate(0.0, Vector2::new(100.0, 100.0)),
    );
    // updated after `short`, its hit box covers `short`'s position
    let long = sim.spawn_actor(
        AttackTemplate {
            frame_life: 10.0,
            ..AttackTemplate::default()
        }
        .instantiate(0.0, Vector2::new(100.0, 110.0)),
    );

    sim.step(&idle(), 1.0);
    assert!(sim.is_alive(short));

    sim.step(&idle(), 1.0);
    assert!(!sim.is_alive(short));
    assert_eq!(sim.get::<Attack>(long).unwrap().frame_index, 1);
    assert!(sim.get::<Attack>(long).unwrap().hit_actors().is_empty());
}

fn despawn_aged_attacks_twice(attacks: Query<(Entity, &Attack)>, mut commands: Commands) {
    for (entity, attack) in attacks.iter() {
        if attack.frame_index >= 1 {
            commands.entity(entity).try_despawn();
            commands.entity(entity).try_despawn();
        }
    }
}

#[test]
fn repeated_removal_within_a_frame_is_harmless() {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(SimConfig::default());
    let attack = world
        .spawn(
            AttackTemplate {
                frame_life: 0.125,
                ..AttackTemplate::default()
            }
            .instantiate(0.0, Vector2::new(0.0, 0.0)),
        )
        .id();

    // no sync point between the systems: all removals of a frame pile up
    let mut schedule = Schedule::default();
    schedule.set_build_settings(ScheduleBuildSettings {
        auto_insert_apply_deferred: false,
        ..Default::default()
    });
    schedule.add_systems((attack_update, despawn_aged_attacks_twice).chain());

    schedule.run(&mut world);
    world.clear_trackers();
    assert!(world.get_entity(attack).is_ok());

    // expires in attack_update and is removed twice more afterwards
    schedule.run(&mut world);
    assert!(world.get_entity(attack).is_err());
}
