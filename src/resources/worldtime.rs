use bevy_ecs::prelude::Resource;

/// Simulation clock.
///
/// `time_scale` is the frame time-scale handed to actor updates: how many
/// nominal frames the current tick stands for (1.0 at the reference rate).
/// Velocities are multiplied by it before being added to positions.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}
