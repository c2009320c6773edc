//! Asset setup for newly registered actors.
//!
//! Runs at the end of every frame, before anything is drawn. Sprites added
//! since the last run get their texture path resolved into a
//! [`TextureHandle`](crate::resources::texturestore::TextureHandle); a new
//! player also registers its weapon overlay.
use bevy_ecs::prelude::*;

use crate::components::player::{Player, SCYTHE_SPRITE_PATH};
use crate::components::sprite::Sprite;
use crate::resources::texturestore::TextureStore;

pub fn actor_setup(
    mut sprites: Query<&mut Sprite, Added<Sprite>>,
    new_players: Query<(), Added<Player>>,
    mut textures: ResMut<TextureStore>,
) {
    for mut sprite in sprites.iter_mut() {
        if sprite.handle.is_none() {
            let handle = textures.load(&sprite.tex_key);
            sprite.handle = Some(handle);
        }
    }
    if !new_players.is_empty() {
        textures.load(SCYTHE_SPRITE_PATH);
    }
}
