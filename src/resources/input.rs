//! Per-frame keyboard input resource.
//!
//! Captures the four logical gameplay inputs (move, run, jump, steal) plus
//! the window toggles, and exposes them to systems via the [`InputState`]
//! resource. Movement accepts both the arrow keys and WASD.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with its keyboard bindings.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
    /// Optional second key for the same action.
    pub alt_binding: Option<KeyboardKey>,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
            alt_binding: None,
        }
    }

    pub fn with_alt(mut self, key: KeyboardKey) -> Self {
        self.alt_binding = Some(key);
        self
    }

    /// Feed the held state for this frame; edges are derived from the previous frame.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_up: BoolState,
    pub move_down: BoolState,
    pub move_left: BoolState,
    pub move_right: BoolState,
    /// Run modifier.
    pub run: BoolState,
    /// Edge-triggered jump.
    pub jump: BoolState,
    /// Edge-triggered steal, only meaningful near an NPC.
    pub steal: BoolState,
    pub fullscreen_toggle: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_up: BoolState::bound(KeyboardKey::KEY_UP).with_alt(KeyboardKey::KEY_W),
            move_down: BoolState::bound(KeyboardKey::KEY_DOWN).with_alt(KeyboardKey::KEY_S),
            move_left: BoolState::bound(KeyboardKey::KEY_LEFT).with_alt(KeyboardKey::KEY_A),
            move_right: BoolState::bound(KeyboardKey::KEY_RIGHT).with_alt(KeyboardKey::KEY_D),
            run: BoolState::bound(KeyboardKey::KEY_LEFT_SHIFT)
                .with_alt(KeyboardKey::KEY_RIGHT_SHIFT),
            jump: BoolState::bound(KeyboardKey::KEY_SPACE),
            steal: BoolState::bound(KeyboardKey::KEY_E),
            fullscreen_toggle: BoolState::bound(KeyboardKey::KEY_F10),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Mutable access to every binding, in a fixed order.
    pub fn all_mut(&mut self) -> [&mut BoolState; 9] {
        [
            &mut self.move_up,
            &mut self.move_down,
            &mut self.move_left,
            &mut self.move_right,
            &mut self.run,
            &mut self.jump,
            &mut self.steal,
            &mut self.fullscreen_toggle,
            &mut self.mode_debug,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
        assert!(bs.alt_binding.is_none());
    }

    #[test]
    fn test_update_derives_edges() {
        let mut bs = BoolState::bound(KeyboardKey::KEY_E);
        bs.update(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.update(true);
        assert!(bs.active && !bs.just_pressed);
        bs.update(false);
        assert!(!bs.active && bs.just_released);
        bs.update(false);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.move_up.key_binding, KeyboardKey::KEY_UP);
        assert_eq!(input.move_up.alt_binding, Some(KeyboardKey::KEY_W));
        assert_eq!(input.move_left.key_binding, KeyboardKey::KEY_LEFT);
        assert_eq!(input.run.key_binding, KeyboardKey::KEY_LEFT_SHIFT);
        assert_eq!(input.jump.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.steal.key_binding, KeyboardKey::KEY_E);
        assert_eq!(input.fullscreen_toggle.key_binding, KeyboardKey::KEY_F10);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let mut input = InputState::default();
        for state in input.all_mut() {
            assert!(!state.active);
            assert!(!state.just_pressed);
        }
    }
}
