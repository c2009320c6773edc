//! Toggle for the debug box overlay.
//!
//! Triggering a [`SwitchDebugEvent`] flips the presence of the [`DebugMode`]
//! resource, which the renderer checks before outlining collision and hit
//! boxes.
use crate::resources::debugmode::DebugMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Observer that inserts or removes [`DebugMode`].
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        log::info!("Debug overlay disabled");
    } else {
        commands.insert_resource(DebugMode);
        log::info!("Debug overlay enabled");
    }
}
