//! Player update system.
//!
//! Once per frame, for every [`Player`]:
//!
//! 1. advance the walk animation counter (wraps at
//!    `player_animation_frames * frame_skip`);
//! 2. steer the [`RigidBody`] from the movement keys (normalized, so diagonal
//!    input is not faster and no input stops the player);
//! 3. check the attack keys in [`AttackDirection::PRIORITY`] order and try the
//!    first one pressed ([`attack_at_direction`]);
//! 4. step the attack counter;
//! 5. update the facing from the horizontal velocity;
//! 6. move by `velocity * time_scale`, rejecting the whole step if the new
//!    collision box touches another actor sharing a collision layer.
//!
//! Attacks are spawned through [`Commands`], so they become live actors at the
//! next sync point (before [`attack_update`](super::attack::attack_update)
//! runs in the same frame). Until then the system tracks their bodies itself
//! ([`QueuedBody`]) so movement checks later in the same run still see them.
use bevy_ecs::prelude::*;
use log::{debug, trace};
use raylib::prelude::Vector2;

use smallvec::SmallVec;

use crate::components::actor::{Actor, CollisionLayers};
use crate::components::attack::AttackDirection;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, attack_spawn_position};
use crate::components::rigidbody::RigidBody;
use crate::resources::input::{InputAction, InputState};
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Bodies of all live actors: collision queries read them, the movement step
/// writes the mover's position.
pub type BodyQuery<'w, 's> = Query<'w, 's, (Entity, &'static Actor, &'static mut MapPosition, &'static BoxCollider)>;

fn attack_action(direction: AttackDirection) -> Option<InputAction> {
    match direction {
        AttackDirection::None => None,
        AttackDirection::Up => Some(InputAction::AttackUp),
        AttackDirection::Down => Some(InputAction::AttackDown),
        AttackDirection::Left => Some(InputAction::AttackLeft),
        AttackDirection::Right => Some(InputAction::AttackRight),
    }
}

/// First attack direction whose key is held, in priority order.
pub fn requested_attack(input: &InputState) -> Option<AttackDirection> {
    AttackDirection::PRIORITY
        .into_iter()
        .find(|d| attack_action(*d).is_some_and(|a| input.is_pressed(a)))
}

/// Start an attack from `attacker` towards `direction` if the player can.
///
/// Spawns the attack entity from the matching template and returns its id.
/// Inert directions and requests while an attack is running do nothing.
pub fn attack_at_direction(
    attacker: Entity,
    player: &mut Player,
    position: Vector2,
    direction: AttackDirection,
    config: &SimConfig,
    commands: &mut Commands,
) -> Option<Entity> {
    let Some(template) = player.begin_attack(direction) else {
        trace!("{:?}: attack {:?} ignored", attacker, direction);
        return None;
    };
    let spawn_at = attack_spawn_position(position, direction, config.attack_offset);
    let attack = commands
        .spawn(template.instantiate(direction.rotation(), spawn_at))
        .id();
    debug!(
        "{:?} attacks {:?}: spawned {:?} at ({:.1}, {:.1})",
        attacker, direction, attack, spawn_at.x, spawn_at.y
    );
    Some(attack)
}

/// Body of an actor spawned this run whose spawn command is still queued.
#[derive(Debug, Clone, Copy)]
pub struct QueuedBody {
    pub entity: Entity,
    pub layers: CollisionLayers,
    pub collider: BoxCollider,
    pub position: Vector2,
}

/// First actor, other than `mover`, that `collider` would touch at `target`.
///
/// Only actors sharing a collision layer with the mover are considered.
/// `queued` holds bodies spawned this run that `bodies` cannot see yet.
pub fn blocking_actor(
    mover: Entity,
    target: Vector2,
    bodies: &BodyQuery,
    queued: &[QueuedBody],
) -> Option<Entity> {
    let (_, actor, _, collider) = bodies.get(mover).ok()?;
    bodies
        .iter()
        .filter(|(other, other_actor, _, _)| {
            *other != mover && actor.layers.interacts(&other_actor.layers)
        })
        .find(|(_, _, position, other_collider)| {
            collider.overlaps(target, other_collider, position.pos)
        })
        .map(|(other, _, _, _)| other)
        .or_else(|| {
            queued
                .iter()
                .filter(|q| actor.layers.interacts(&q.layers))
                .find(|q| collider.overlaps(target, &q.collider, q.position))
                .map(|q| q.entity)
        })
}

pub fn player_update(
    mut players: Query<(Entity, &mut Player, &mut RigidBody)>,
    mut bodies: BodyQuery,
    input: Res<InputState>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut commands: Commands,
) {
    let mut queued: SmallVec<[QueuedBody; 4]> = SmallVec::new();

    for (entity, mut player, mut body) in players.iter_mut() {
        let Ok((_, _, position, _)) = bodies.get(entity) else {
            continue;
        };
        let origin = position.pos;

        player.advance_animation(config.player_animation_wrap());
        body.steer(input.move_axis());

        if let Some(direction) = requested_attack(&input) {
            let spawned =
                attack_at_direction(entity, &mut player, origin, direction, &config, &mut commands);
            if let (Some(attack), Some(template)) = (spawned, player.attacks.get(direction)) {
                queued.push(QueuedBody {
                    entity: attack,
                    layers: template.layers,
                    collider: BoxCollider(template.collider),
                    position: attack_spawn_position(origin, direction, config.attack_offset),
                });
            }
        }
        player.advance_attack();
        player.update_facing(body.velocity.x);

        let target = origin + body.step(time.time_scale);
        if let Some(blocker) = blocking_actor(entity, target, &bodies, &queued) {
            trace!("{:?} blocked by {:?}", entity, blocker);
            continue;
        }
        if let Ok((_, _, mut position, _)) = bodies.get_mut(entity) {
            position.pos = target;
        }
    }
}
