//! Axis-aligned boxes used for movement blocking and attack hit tests.
//!
//! A [`Rect`] is stored relative to its owner's [`MapPosition`](super::mapposition::MapPosition).
//! The same geometry backs two components:
//! - [`BoxCollider`] – the physical box that blocks movement and receives hits
//! - [`HitBox`] – the box an attack uses to find its victims

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

/// Box defined by two corners relative to an owner position.
///
/// Corners may be given in any order; [`Rect::aabb`] normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns (min, max) of the box translated to `position`.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let (ax, bx) = (self.x1 + position.x, self.x2 + position.x);
        let (ay, by) = (self.y1 + position.y, self.y2 + position.y);
        let min = Vector2::new(ax.min(bx), ay.min(by));
        let max = Vector2::new(ax.max(bx), ay.max(by));
        (min, max)
    }

    /// Returns (x, y, width, height) in world space, handy for debug drawing.
    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Closed-interval overlap test against another box at a different position.
    ///
    /// Touching edges count as overlapping.
    pub fn overlaps(&self, position: Vector2, other: &Rect, other_position: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x <= max_b.x && max_a.x >= min_b.x && min_a.y <= max_b.y && max_a.y >= min_b.y
    }
}

/// Physical box of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Component)]
pub struct BoxCollider(pub Rect);

impl BoxCollider {
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        self.0.overlaps(position, &other.0, other_position)
    }
}

/// Damage-dealing box of an actor, independent of its [`BoxCollider`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Component)]
pub struct HitBox(pub Rect);

impl HitBox {
    /// True when this hit box touches `collider` placed at `collider_position`.
    pub fn reaches(&self, position: Vector2, collider: &BoxCollider, collider_position: Vector2) -> bool {
        self.0.overlaps(position, &collider.0, collider_position)
    }
}
