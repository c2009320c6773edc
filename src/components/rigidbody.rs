//! Kinematic body: the velocity an actor moves with and the speed it moves at.
//!
//! Velocities are expressed in world units per nominal frame. Systems scale
//! them by [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime)
//! when integrating positions.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Velocity and scalar movement speed of an actor.
#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per frame.
    pub velocity: Vector2,
    /// Movement magnitude applied to normalized directions.
    pub speed: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl RigidBody {
    /// Create a resting body that moves at `speed` once given a direction.
    pub fn new(speed: f32) -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            speed,
        }
    }

    /// Point the body along `direction` at its own speed.
    ///
    /// A zero direction stops the body instead of producing NaN.
    pub fn steer(&mut self, direction: Vector2) {
        self.velocity = normalize_or_zero(direction).scale_by(self.speed);
    }

    /// Displacement covered this frame for the given time scale.
    pub fn step(&self, time_scale: f32) -> Vector2 {
        self.velocity.scale_by(time_scale)
    }
}

/// Unit vector along `v`, or the zero vector when `v` has no length.
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Vector2 {
            x: v.x / len,
            y: v.y / len,
        }
    } else {
        Vector2 { x: 0.0, y: 0.0 }
    }
}
