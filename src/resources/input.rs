//! Per-frame input snapshot.
//!
//! [`InputState`] holds whether each logical action is pressed this frame.
//! The binary fills it from the keyboard (see
//! [`crate::systems::input::update_input_state`]); tests build it directly
//! with [`InputState::with_pressed`]. Defaults use WASD for movement and the
//! arrow keys for attacks.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Logical actions the simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Up,
    Down,
    AttackUp,
    AttackDown,
    AttackLeft,
    AttackRight,
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Snapshot of the actions relevant to the simulation.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
    pub attack_up: BoolState,
    pub attack_down: BoolState,
    pub attack_left: BoolState,
    pub attack_right: BoolState,
    /// Toggles the debug overlay; not part of the simulation input.
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            left: BoolState::bound_to(KeyboardKey::KEY_A),
            right: BoolState::bound_to(KeyboardKey::KEY_D),
            up: BoolState::bound_to(KeyboardKey::KEY_W),
            down: BoolState::bound_to(KeyboardKey::KEY_S),
            attack_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            attack_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            attack_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            attack_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    pub fn state(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Up => &self.up,
            InputAction::Down => &self.down,
            InputAction::AttackUp => &self.attack_up,
            InputAction::AttackDown => &self.attack_down,
            InputAction::AttackLeft => &self.attack_left,
            InputAction::AttackRight => &self.attack_right,
        }
    }

    pub fn state_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Up => &mut self.up,
            InputAction::Down => &mut self.down,
            InputAction::AttackUp => &mut self.attack_up,
            InputAction::AttackDown => &mut self.attack_down,
            InputAction::AttackLeft => &mut self.attack_left,
            InputAction::AttackRight => &mut self.attack_right,
        }
    }

    pub fn is_pressed(&self, action: InputAction) -> bool {
        self.state(action).active
    }

    pub fn set_pressed(&mut self, action: InputAction, pressed: bool) {
        self.state_mut(action).active = pressed;
    }

    /// Copy of this snapshot with `actions` held.
    pub fn with_pressed(mut self, actions: &[InputAction]) -> Self {
        for action in actions {
            self.set_pressed(*action, true);
        }
        self
    }

    /// Release every action.
    pub fn clear(&mut self) {
        for action in ALL_ACTIONS {
            let s = self.state_mut(action);
            s.active = false;
            s.just_pressed = false;
        }
        self.mode_debug.active = false;
        self.mode_debug.just_pressed = false;
    }

    /// Movement axis: (right − left, down − up).
    pub fn move_axis(&self) -> Vector2 {
        let axis = |pos: InputAction, neg: InputAction| {
            self.is_pressed(pos) as i32 as f32 - self.is_pressed(neg) as i32 as f32
        };
        Vector2 {
            x: axis(InputAction::Right, InputAction::Left),
            y: axis(InputAction::Down, InputAction::Up),
        }
    }
}

pub const ALL_ACTIONS: [InputAction; 8] = [
    InputAction::Left,
    InputAction::Right,
    InputAction::Up,
    InputAction::Down,
    InputAction::AttackUp,
    InputAction::AttackDown,
    InputAction::AttackLeft,
    InputAction::AttackRight,
];
