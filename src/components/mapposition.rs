use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position of an actor. Boxes are offset from this point.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
