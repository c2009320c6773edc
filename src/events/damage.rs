//! Damage events.
//!
//! Attacks never touch a victim's [`Health`] directly. They trigger a
//! [`DamageEvent`] and [`apply_damage_observer`] applies it once the commands
//! of the current system are flushed. Victims that were despawned in the
//! meantime are skipped.
//!
//! Reaching zero health is only logged: what dying means is up to the game.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actor::{Actor, Health};

/// Request to subtract `amount` from the health of `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: Entity,
    /// The actor dealing the damage.
    pub source: Entity,
    pub amount: i32,
}

/// Global observer applying [`DamageEvent`]s to [`Health`].
pub fn apply_damage_observer(
    trigger: On<DamageEvent>,
    mut victims: Query<(&mut Health, Option<&Actor>)>,
) {
    let event = *trigger.event();
    let Ok((mut health, actor)) = victims.get_mut(event.target) else {
        debug!("Damage to {:?} dropped: no longer alive", event.target);
        return;
    };

    let before = health.current;
    let left = health.damage(event.amount);
    debug!(
        "{:?} dealt {} damage to {:?} ({} -> {})",
        event.source, event.amount, event.target, before, left
    );
    if before > 0 && left <= 0 {
        info!(
            "{:?} ({:?}) reached zero health",
            event.target,
            actor.map(|a| a.kind)
        );
    }
}
