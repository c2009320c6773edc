//! Shared actor components.
//!
//! Every simulated entity carries the same base set of components, grouped in
//! [`ActorBundle`]: an [`Actor`] tag with its collision layers, a
//! [`MapPosition`], a [`RigidBody`], a [`BoxCollider`], a [`HitBox`] and
//! [`Health`]. Behaviour is added by a variant component:
//! [`Player`](super::player::Player) or [`Attack`](super::attack::Attack).
//! Actors without a variant component are inert (walls, dummies).

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::{BoxCollider, HitBox, Rect};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;

/// Behavioural category of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    #[default]
    Neutral,
}

/// Number of collision layers shared by the whole actor population.
pub const LAYER_COUNT: usize = 4;

/// Layer that solid terrain and bodies live on.
pub const LAYER_SOLID: usize = 0;

/// Which collision layers an actor's physical box takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub [bool; LAYER_COUNT]);

impl CollisionLayers {
    pub const NONE: Self = Self([false; LAYER_COUNT]);
    pub const SOLID: Self = Self([true, false, false, false]);

    pub fn contains(&self, layer: usize) -> bool {
        self.0.get(layer).copied().unwrap_or(false)
    }

    /// True when both masks share at least one layer.
    pub fn interacts(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(a, b)| *a && *b)
    }
}

/// Tag carried by every live actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub kind: ActorKind,
    pub layers: CollisionLayers,
}

impl Actor {
    pub fn new(kind: ActorKind, layers: CollisionLayers) -> Self {
        Self { kind, layers }
    }
}

/// Current and maximum health. An actor is dead once `current <= 0`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub max: i32,
    pub current: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { max, current: max }
    }

    pub fn with_current(max: i32, current: i32) -> Self {
        Self {
            max,
            current: current.min(max),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Subtract `amount` and return the health left.
    ///
    /// Non-positive amounts are ignored so damage can never heal.
    pub fn damage(&mut self, amount: i32) -> i32 {
        if amount > 0 {
            self.current = self.current.saturating_sub(amount);
        }
        self.current
    }
}

/// Base components shared by all actors.
#[derive(Bundle, Clone)]
pub struct ActorBundle {
    pub actor: Actor,
    pub position: MapPosition,
    pub body: RigidBody,
    pub collider: BoxCollider,
    pub hit_box: HitBox,
    pub health: Health,
}

impl ActorBundle {
    pub fn new(kind: ActorKind, position: Vector2, collider: Rect, hit_box: Rect) -> Self {
        Self {
            actor: Actor::new(kind, CollisionLayers::NONE),
            position: MapPosition::from_vec(position),
            body: RigidBody::default(),
            collider: BoxCollider(collider),
            hit_box: HitBox(hit_box),
            health: Health::new(1),
        }
    }

    /// A solid neutral actor (wall, training dummy) with a square body.
    pub fn solid(position: Vector2, half_extent: f32, health: i32) -> Self {
        let r = Rect::new(-half_extent, -half_extent, half_extent, half_extent);
        Self::new(ActorKind::Neutral, position, r, r)
            .with_layers(CollisionLayers::SOLID)
            .with_health(Health::new(health))
    }

    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.actor.layers = layers;
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.body.speed = speed;
        self
    }
}
