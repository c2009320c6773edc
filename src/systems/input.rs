//! Keyboard polling.
//!
//! [`update_input_state`] reads the bound keys from raylib once per frame and
//! writes them into the [`InputState`] snapshot the simulation consumes. It is
//! only used by the windowed binary; headless runs and tests fill the snapshot
//! themselves.
use raylib::RaylibHandle;

use crate::resources::input::{ALL_ACTIONS, InputState};

/// Refresh `input` from the keyboard.
///
/// Returns true when the debug toggle key went down this frame.
pub fn update_input_state(rl: &RaylibHandle, input: &mut InputState) -> bool {
    for action in ALL_ACTIONS {
        let state = input.state_mut(action);
        state.active = rl.is_key_down(state.key_binding);
        state.just_pressed = rl.is_key_pressed(state.key_binding);
    }
    let debug = &mut input.mode_debug;
    debug.active = rl.is_key_down(debug.key_binding);
    debug.just_pressed = rl.is_key_pressed(debug.key_binding);
    debug.just_pressed
}
