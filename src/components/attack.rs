//! Attack entities and the templates they are stamped from.
//!
//! An [`Attack`] is a short-lived actor spawned by a combat action. It travels
//! along its `rotation`, damages every actor its hit box reaches (each victim
//! at most once) and removes itself after `frame_life * frame_skip` frames.
//!
//! Attacks are produced from an [`AttackTemplate`] owned by the
//! [`Player`](super::player::Player): the template carries the stats, the
//! spawn call supplies rotation and position. Templates are grouped per
//! direction in an [`AttackTemplateSet`], where a missing entry makes that
//! direction inert.
//!
//! # Template JSON
//!
//! ```json
//! {
//!   "up":   { "damage": 1, "frame_life": 0.5 },
//!   "left": { "damage": 2, "speed": 3.0, "sprite_id": "sprites/weapon/32slash.png" }
//! }
//! ```
//!
//! Omitted fields take the defaults of [`AttackTemplate::default`].

use std::path::Path;

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::actor::{ActorBundle, ActorKind, CollisionLayers, Health};
use crate::components::boxcollider::Rect;
use crate::components::sprite::Sprite;

/// Direction an attack is launched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttackDirection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl AttackDirection {
    /// Order in which attack inputs are checked; the first pressed one wins.
    pub const PRIORITY: [AttackDirection; 4] = [
        AttackDirection::Up,
        AttackDirection::Down,
        AttackDirection::Left,
        AttackDirection::Right,
    ];

    /// Unit offset from the attacker to the spawn point.
    pub fn offset(self) -> Vector2 {
        match self {
            AttackDirection::None => Vector2 { x: 0.0, y: 0.0 },
            AttackDirection::Up => Vector2 { x: 0.0, y: -1.0 },
            AttackDirection::Down => Vector2 { x: 0.0, y: 1.0 },
            AttackDirection::Left => Vector2 { x: -1.0, y: 0.0 },
            AttackDirection::Right => Vector2 { x: 1.0, y: 0.0 },
        }
    }

    /// Travel angle in radians matching [`AttackDirection::offset`].
    pub fn rotation(self) -> f32 {
        let o = self.offset();
        o.y.atan2(o.x)
    }
}

/// Stats of an attack, without a live position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTemplate {
    pub collider: Rect,
    pub hit_box: Rect,
    pub max_health: i32,
    pub health: i32,
    pub speed: f32,
    pub layers: CollisionLayers,
    pub kind: ActorKind,
    pub damage: i32,
    pub sprite_id: String,
    pub max_frames: u32,
    /// Lifetime in frame-skip units.
    pub frame_life: f32,
}

impl Default for AttackTemplate {
    fn default() -> Self {
        Self {
            collider: Rect::new(0.0, 0.0, 0.0, 0.0),
            hit_box: Rect::new(-32.0, -32.0, 32.0, 32.0),
            max_health: -1,
            health: -1,
            speed: 0.0,
            layers: CollisionLayers::NONE,
            kind: ActorKind::Neutral,
            damage: 1,
            sprite_id: "sprites/weapon/32slash.png".to_string(),
            max_frames: 1,
            frame_life: 0.5,
        }
    }
}

impl AttackTemplate {
    /// Build a fresh attack entity from this template.
    pub fn instantiate(&self, rotation: f32, position: Vector2) -> AttackBundle {
        let base = ActorBundle::new(self.kind, position, self.collider, self.hit_box)
            .with_layers(self.layers)
            .with_speed(self.speed)
            .with_health(Health::with_current(self.max_health, self.health));
        AttackBundle {
            base,
            attack: Attack {
                damage: self.damage,
                sprite_id: self.sprite_id.clone(),
                max_frames: self.max_frames.max(1),
                frame_life: self.frame_life,
                frame_index: 0,
                rotation,
                hit_order: SmallVec::new(),
                hit_set: FxHashSet::default(),
            },
            sprite: Sprite::new(self.sprite_id.clone(), 64.0, 64.0),
        }
    }
}

/// One optional template per attack direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTemplateSet {
    pub up: Option<AttackTemplate>,
    pub down: Option<AttackTemplate>,
    pub left: Option<AttackTemplate>,
    pub right: Option<AttackTemplate>,
}

impl Default for AttackTemplateSet {
    /// Only the upward attack is armed.
    fn default() -> Self {
        Self {
            up: Some(AttackTemplate::default()),
            down: None,
            left: None,
            right: None,
        }
    }
}

impl AttackTemplateSet {
    /// A set where every direction is inert.
    pub fn empty() -> Self {
        Self {
            up: None,
            down: None,
            left: None,
            right: None,
        }
    }

    pub fn get(&self, direction: AttackDirection) -> Option<&AttackTemplate> {
        match direction {
            AttackDirection::None => None,
            AttackDirection::Up => self.up.as_ref(),
            AttackDirection::Down => self.down.as_ref(),
            AttackDirection::Left => self.left.as_ref(),
            AttackDirection::Right => self.right.as_ref(),
        }
    }

    /// Replace the template for `direction`; `None` clears it. The
    /// `AttackDirection::None` slot does not exist and is ignored.
    pub fn set(&mut self, direction: AttackDirection, template: Option<AttackTemplate>) {
        match direction {
            AttackDirection::None => {}
            AttackDirection::Up => self.up = template,
            AttackDirection::Down => self.down = template,
            AttackDirection::Left => self.left = template,
            AttackDirection::Right => self.right = template,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse attack templates: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let set = Self::from_json_str(&json)?;
        log::info!(
            "Loaded attack templates from {} (up={}, down={}, left={}, right={})",
            path.display(),
            set.up.is_some(),
            set.down.is_some(),
            set.left.is_some(),
            set.right.is_some()
        );
        Ok(set)
    }
}

/// Runtime state of a live attack.
#[derive(Component, Debug, Clone)]
pub struct Attack {
    pub damage: i32,
    pub sprite_id: String,
    pub max_frames: u32,
    /// Lifetime in frame-skip units.
    pub frame_life: f32,
    pub frame_index: u32,
    /// Direction of travel in radians.
    pub rotation: f32,
    hit_order: SmallVec<[Entity; 4]>,
    hit_set: FxHashSet<Entity>,
}

impl Attack {
    /// True once the attack has lived `frame_life * frame_skip` frames.
    pub fn is_expired(&self, frame_skip: u32) -> bool {
        self.frame_index as f32 >= self.frame_life * frame_skip as f32
    }

    /// Unit travel direction derived from `rotation`.
    pub fn heading(&self) -> Vector2 {
        Vector2 {
            x: self.rotation.cos(),
            y: self.rotation.sin(),
        }
    }

    pub fn has_hit(&self, actor: Entity) -> bool {
        self.hit_set.contains(&actor)
    }

    /// Record `actor` as damaged. Returns false if it was already recorded.
    pub fn record_hit(&mut self, actor: Entity) -> bool {
        if !self.hit_set.insert(actor) {
            return false;
        }
        self.hit_order.push(actor);
        true
    }

    /// Victims in the order they were hit.
    pub fn hit_actors(&self) -> &[Entity] {
        &self.hit_order
    }

    /// Animation frame to display.
    pub fn current_frame(&self, frame_skip: u32) -> u32 {
        (self.frame_index / frame_skip.max(1)) % self.max_frames.max(1)
    }
}

/// Everything a live attack entity is made of.
#[derive(Bundle, Clone)]
pub struct AttackBundle {
    pub base: ActorBundle,
    pub attack: Attack,
    pub sprite: Sprite,
}
