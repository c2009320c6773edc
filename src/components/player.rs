//! Player-controlled actor and its attack state machine.
//!
//! The attack cycle is a single counter, `attack_frame`, read in two bands:
//!
//! | state        | `attack_frame`                         | `can_attack` |
//! |--------------|----------------------------------------|--------------|
//! | `Active`     | `0 ..= attack_frame_length`            | false        |
//! | `Recovering` | `attack_frame_length + 1 ..= L + D`    | false        |
//! | `Idle`       | anything, with no attack direction set | true         |
//!
//! (`L` = `attack_frame_length`, `D` = `attack_frame_delay`.) An accepted
//! attack resets the counter to 0; once it exceeds `L + D` the player returns
//! to `Idle`. Attack input while not idle is dropped.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::actor::{ActorBundle, ActorKind, CollisionLayers, Health};
use crate::components::attack::{AttackDirection, AttackTemplate, AttackTemplateSet};
use crate::components::boxcollider::Rect;
use crate::components::sprite::Sprite;

pub const PLAYER_SPRITE_PATH: &str = "sprites/player/reaper.png";
pub const SCYTHE_SPRITE_PATH: &str = "sprites/weapon/scythe.png";

/// Phase of the player's attack cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackState {
    Idle,
    Active,
    Recovering,
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Animation counter in raw frames.
    pub frame_index: u32,
    /// -1 or +1; the sprite sheet faces left, so moving right mirrors it.
    pub facing_scale: f32,
    pub attack_direction: AttackDirection,
    pub attack_frame_length: u32,
    pub attack_frame: u32,
    pub can_attack: bool,
    pub attack_frame_delay: u32,
    pub attacks: AttackTemplateSet,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            frame_index: 0,
            facing_scale: 1.0,
            attack_direction: AttackDirection::None,
            attack_frame_length: 12,
            attack_frame: 12,
            can_attack: true,
            attack_frame_delay: 12,
            attacks: AttackTemplateSet::default(),
        }
    }
}

impl Player {
    pub fn with_attacks(mut self, attacks: AttackTemplateSet) -> Self {
        self.attacks = attacks;
        self
    }

    pub fn with_timing(mut self, attack_frame_length: u32, attack_frame_delay: u32) -> Self {
        self.attack_frame_length = attack_frame_length;
        self.attack_frame_delay = attack_frame_delay;
        self
    }

    pub fn attack_state(&self) -> AttackState {
        if self.attack_direction == AttackDirection::None {
            AttackState::Idle
        } else if self.attack_frame <= self.attack_frame_length {
            AttackState::Active
        } else {
            AttackState::Recovering
        }
    }

    /// Advance the animation counter, wrapping at `wrap_at` raw frames.
    pub fn advance_animation(&mut self, wrap_at: u32) {
        self.frame_index += 1;
        if self.frame_index >= wrap_at {
            self.frame_index = 0;
        }
    }

    /// Try to start an attack towards `direction`.
    ///
    /// Returns the template to spawn from when the attack is accepted. Inert
    /// directions and attacks requested while not idle return `None` and
    /// leave the state untouched.
    pub fn begin_attack(&mut self, direction: AttackDirection) -> Option<&AttackTemplate> {
        if self.attacks.get(direction).is_none() || !self.can_attack {
            return None;
        }
        self.attack_direction = direction;
        self.can_attack = false;
        self.attack_frame = 0;
        self.attacks.get(direction)
    }

    /// Step the attack counter and return to idle once recovery is over.
    pub fn advance_attack(&mut self) {
        if self.attack_direction != AttackDirection::None {
            self.attack_frame += 1;
        }
        if self.attack_frame > self.attack_frame_length + self.attack_frame_delay {
            self.attack_direction = AttackDirection::None;
            self.can_attack = true;
        }
    }

    /// Remember the last horizontal heading. Standing still keeps it.
    pub fn update_facing(&mut self, velocity_x: f32) {
        if velocity_x > 0.0 {
            self.facing_scale = -1.0;
        } else if velocity_x < 0.0 {
            self.facing_scale = 1.0;
        }
    }

    /// Whether the weapon is drawn resting on the player.
    pub fn shows_weapon(&self) -> bool {
        self.attack_frame >= self.attack_frame_length
    }
}

/// Where an attack towards `direction` appears for an attacker at `position`.
pub fn attack_spawn_position(position: Vector2, direction: AttackDirection, attack_offset: f32) -> Vector2 {
    position + direction.offset().scale_by(attack_offset)
}

#[derive(Bundle, Clone)]
pub struct PlayerBundle {
    pub base: ActorBundle,
    pub player: Player,
    pub sprite: Sprite,
}

impl PlayerBundle {
    pub fn new(position: Vector2) -> Self {
        let body = Rect::new(-20.0, -20.0, 20.0, 20.0);
        Self {
            base: ActorBundle::new(ActorKind::Player, position, body, body)
                .with_layers(CollisionLayers::SOLID)
                .with_health(Health::new(3))
                .with_speed(2.0),
            player: Player::default(),
            sprite: Sprite::new(PLAYER_SPRITE_PATH, 64.0, 64.0),
        }
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }
}
