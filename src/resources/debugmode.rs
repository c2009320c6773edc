//! Debug overlay toggle.
//!
//! While this resource exists the renderer outlines every collision box in
//! red and every hit box in yellow. Removing it hides the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the box overlay is enabled.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
