//! Attack update system.
//!
//! Each frame, for every live [`Attack`]:
//!
//! 1. skip it entirely on the frame it was spawned;
//! 2. count the frame; once `frame_index >= frame_life * frame_skip` request
//!    its removal and do nothing else this frame;
//! 3. move along `rotation` at the body's speed, scaled by the frame
//!    time-scale;
//! 4. damage every other actor whose collision box touches the attack's hit
//!    box and that this attack has not hit before.
//!
//! Removal goes through [`Commands`], so the rest of the frame keeps
//! iterating safely; attacks removed earlier in the same frame are no longer
//! hit-test candidates. Victims are not filtered by kind: an attack may hit
//! the player that spawned it or another attack.
use bevy_ecs::prelude::*;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::components::actor::Actor;
use crate::components::attack::Attack;
use crate::components::boxcollider::{BoxCollider, HitBox};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::damage::DamageEvent;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

pub fn attack_update(
    mut attacks: Query<(Entity, &mut Attack)>,
    mut bodies: Query<(Entity, &mut MapPosition, &mut RigidBody, &BoxCollider, &HitBox), With<Actor>>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut commands: Commands,
) {
    let mut removed: SmallVec<[Entity; 8]> = SmallVec::new();

    for (entity, mut attack) in attacks.iter_mut() {
        if attack.is_added() {
            trace!("{:?} spawned this frame, first update next frame", entity);
            continue;
        }

        attack.frame_index += 1;
        if attack.is_expired(config.frame_skip) {
            debug!(
                "{:?} expired after {} frames, hit {} actor(s)",
                entity,
                attack.frame_index,
                attack.hit_actors().len()
            );
            commands.entity(entity).try_despawn();
            removed.push(entity);
            continue;
        }

        let (origin, hit_box) = {
            let Ok((_, mut position, mut body, _, hit_box)) = bodies.get_mut(entity) else {
                continue;
            };
            body.velocity = attack.heading().scale_by(body.speed);
            position.pos = position.pos + body.step(time.time_scale);
            (position.pos, *hit_box)
        };

        let victims: SmallVec<[Entity; 8]> = bodies
            .iter()
            .filter(|(other, ..)| {
                *other != entity && !removed.contains(other) && !attack.has_hit(*other)
            })
            .filter(|(_, position, _, collider, _)| hit_box.reaches(origin, collider, position.pos))
            .map(|(other, ..)| other)
            .collect();

        for victim in victims {
            attack.record_hit(victim);
            commands.trigger(DamageEvent {
                target: victim,
                source: entity,
                amount: attack.damage,
            });
        }
    }
}
