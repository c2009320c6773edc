//! Drawing of actors with raylib.
//!
//! Rendering only reads simulation state. Sprite textures are uploaded
//! lazily: every frame [`LoadedTextures::upload_pending`] loads whatever the
//! setup system registered in the [`TextureStore`] since the last frame.
//!
//! - Player: walk frame `frame_index / frame_skip` while moving (frame 0 when
//!   standing), mirrored by `facing_scale`, with the weapon overlay while
//!   `attack_frame >= attack_frame_length` (this includes the last frame of
//!   the active band).
//! - Attack: frame `(frame_index / frame_skip) % max_frames`, rotated along
//!   its travel direction.
//! - With [`DebugMode`] present, collision boxes are outlined in red and hit
//!   boxes in yellow.
use bevy_ecs::prelude::*;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::attack::Attack;
use crate::components::boxcollider::{BoxCollider, HitBox};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, SCYTHE_SPRITE_PATH};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::debugmode::DebugMode;
use crate::resources::simconfig::SimConfig;
use crate::resources::texturestore::{TextureHandle, TextureStore};

const ASSET_ROOT: &str = "./assets";

/// GPU textures keyed by the handles of the [`TextureStore`].
#[derive(Default)]
pub struct LoadedTextures {
    textures: FxHashMap<TextureHandle, Texture2D>,
}

impl LoadedTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the textures registered since the previous call.
    ///
    /// Failures are logged; the affected actors are drawn as outlines.
    pub fn upload_pending(&mut self, world: &mut World, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let pending = world.resource_mut::<TextureStore>().pending();
        for (handle, path) in pending {
            let full_path = format!("{}/{}", ASSET_ROOT, path);
            match rl.load_texture(thread, &full_path) {
                Ok(texture) => {
                    log::debug!("Loaded texture {} as {:?}", full_path, handle);
                    self.textures.insert(handle, texture);
                }
                Err(e) => log::warn!("Failed to load texture {}: {:?}", full_path, e),
            }
        }
    }

    pub fn get(&self, handle: Option<TextureHandle>) -> Option<&Texture2D> {
        handle.and_then(|h| self.textures.get(&h))
    }
}

fn frame_source(texture: &Texture2D, frame: u32, frames: u32, mirror: f32) -> Rectangle {
    let frame_width = texture.width as f32 / frames.max(1) as f32;
    Rectangle {
        x: frame as f32 * frame_width,
        y: 0.0,
        width: frame_width * mirror,
        height: texture.height as f32,
    }
}

fn dest_rect(sprite: &Sprite, pos: Vector2) -> Rectangle {
    Rectangle {
        x: pos.x,
        y: pos.y,
        width: sprite.width,
        height: sprite.height,
    }
}

/// Draw every actor that has a sprite, then the debug overlay if enabled.
pub fn render_actors(world: &mut World, d: &mut impl RaylibDraw, textures: &LoadedTextures) {
    let config = *world.resource::<SimConfig>();
    let scythe = world.resource::<TextureStore>().get(SCYTHE_SPRITE_PATH);

    let mut sprites =
        world.query::<(&MapPosition, &Sprite, Option<&RigidBody>, Option<&Player>, Option<&Attack>)>();
    for (position, sprite, body, player, attack) in sprites.iter(world) {
        let dest = dest_rect(sprite, position.pos);
        let Some(texture) = textures.get(sprite.handle) else {
            // texture missing or not uploaded yet
            d.draw_rectangle_lines(
                (dest.x - sprite.origin.x) as i32,
                (dest.y - sprite.origin.y) as i32,
                dest.width as i32,
                dest.height as i32,
                Color::MAGENTA,
            );
            continue;
        };

        match (player, attack) {
            (Some(player), _) => {
                let moving = body.is_some_and(|b| b.velocity.length() > 0.0);
                let frame = if moving {
                    player.frame_index / config.frame_skip.max(1)
                } else {
                    0
                };
                let src = frame_source(texture, frame, config.player_animation_frames, player.facing_scale);
                d.draw_texture_pro(texture, src, dest, sprite.origin, 0.0, Color::WHITE);
                if player.shows_weapon() {
                    if let Some(weapon) = textures.get(scythe) {
                        let src = frame_source(weapon, 0, 1, player.facing_scale);
                        let dest = Rectangle {
                            width: dest.width * 2.0,
                            height: dest.height * 2.0,
                            ..dest
                        };
                        let origin = Vector2 {
                            x: sprite.origin.x * 2.0,
                            y: sprite.origin.y * 2.0,
                        };
                        d.draw_texture_pro(weapon, src, dest, origin, 0.0, Color::WHITE);
                    }
                }
            }
            (None, Some(attack)) => {
                let src = frame_source(texture, attack.current_frame(config.frame_skip), attack.max_frames, 1.0);
                d.draw_texture_pro(
                    texture,
                    src,
                    dest,
                    sprite.origin,
                    attack.rotation.to_degrees(),
                    Color::WHITE,
                );
            }
            (None, None) => {
                let src = frame_source(texture, 0, 1, 1.0);
                d.draw_texture_pro(texture, src, dest, sprite.origin, 0.0, Color::WHITE);
            }
        }
    }

    if world.contains_resource::<DebugMode>() {
        let mut boxes = world.query::<(&MapPosition, &BoxCollider, &HitBox)>();
        for (position, collider, hit_box) in boxes.iter(world) {
            let (x, y, w, h) = collider.0.get_aabb(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
            let (x, y, w, h) = hit_box.0.get_aabb(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::YELLOW);
        }
    }
}
