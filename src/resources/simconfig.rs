//! Shared simulation constants.
//!
//! Timers in the simulation are counted in raw frames; `frame_skip` converts
//! "logical" units (animation frames, attack lifetimes) into raw frames. The
//! values live in this resource rather than in constants so a scene, a test or
//! the `[simulation]` section of `config.ini` can change them.

use bevy_ecs::prelude::Resource;

pub const DEFAULT_FRAME_SKIP: u32 = 8;
pub const DEFAULT_PLAYER_ANIMATION_FRAMES: u32 = 4;
pub const DEFAULT_ATTACK_OFFSET: f32 = 32.0;
pub const DEFAULT_REFERENCE_FPS: f32 = 60.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Raw frames per logical animation/lifetime unit.
    pub frame_skip: u32,
    /// Frames in the player's walk cycle.
    pub player_animation_frames: u32,
    /// Distance from the attacker at which attacks appear.
    pub attack_offset: f32,
    /// Frame rate at which `time_scale` is 1.0.
    pub reference_fps: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_skip: DEFAULT_FRAME_SKIP,
            player_animation_frames: DEFAULT_PLAYER_ANIMATION_FRAMES,
            attack_offset: DEFAULT_ATTACK_OFFSET,
            reference_fps: DEFAULT_REFERENCE_FPS,
        }
    }
}

impl SimConfig {
    /// Raw frame count after which the player's animation counter wraps.
    pub fn player_animation_wrap(&self) -> u32 {
        (self.player_animation_frames * self.frame_skip).max(1)
    }

    /// Frame time-scale for a tick lasting `dt` seconds.
    pub fn time_scale_for(&self, dt: f32) -> f32 {
        dt * self.reference_fps
    }
}
