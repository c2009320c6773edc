//! Clock update helpers.
//!
//! Called by the frame driver before the simulation schedule runs, so every
//! actor update of a frame sees the same [`WorldTime`].
use bevy_ecs::prelude::*;

use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Advance the clock by a real frame of `dt` seconds.
///
/// The frame time-scale is derived from [`SimConfig::reference_fps`].
pub fn update_world_time(world: &mut World, dt: f32) {
    let time_scale = world
        .get_resource::<SimConfig>()
        .copied()
        .unwrap_or_default()
        .time_scale_for(dt);
    advance_world_time(world, dt, time_scale);
}

/// Advance the clock by one frame with an explicit time-scale.
pub fn advance_world_time(world: &mut World, dt: f32, time_scale: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.delta = dt;
    wt.time_scale = time_scale;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_follows_reference_fps() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(SimConfig {
            reference_fps: 50.0,
            ..SimConfig::default()
        });

        update_world_time(&mut world, 0.04);
        let wt = *world.resource::<WorldTime>();
        assert!((wt.time_scale - 2.0).abs() < 1e-5);
        assert!((wt.delta - 0.04).abs() < 1e-6);
        assert_eq!(wt.frame_count, 1);

        advance_world_time(&mut world, 0.02, 1.0);
        let wt = *world.resource::<WorldTime>();
        assert_eq!(wt.time_scale, 1.0);
        assert!((wt.elapsed - 0.06).abs() < 1e-6);
        assert_eq!(wt.frame_count, 2);
    }
}
