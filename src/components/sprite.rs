use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::resources::texturestore::TextureHandle;

/// Sprite is identified by a texture key (an asset path) and its size in world units.
/// The handle is resolved by the setup system the first time the sprite is seen;
/// until then the actor is drawn as an outline.
/// The origin selects the pivot point relative to the sprite's top-left.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub handle: Option<TextureHandle>,
    pub width: f32,
    pub height: f32,
    pub origin: Vector2,
}

impl Sprite {
    /// Sprite pivoted on its centre.
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            handle: None,
            width,
            height,
            origin: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
        }
    }
}
