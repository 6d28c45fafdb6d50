//! Input systems.
//!
//! - [`update_input_state`] reads the keyboard from raylib each frame and
//!   writes the results into [`InputState`].
//! - [`toggle_keys_system`] turns the F10/F11 edges into
//!   [`SwitchFullScreenEvent`] and [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::InputState;

/// Poll raylib for keyboard input and update the `InputState` resource.
///
/// A binding is held when its main key or its alternate key is down.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    for state in input.all_mut() {
        let down = rl.is_key_down(state.key_binding)
            || state.alt_binding.is_some_and(|key| rl.is_key_down(key));
        state.update(down);
    }
}

/// Trigger the window toggles on key press.
pub fn toggle_keys_system(input: Res<InputState>, mut commands: Commands) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.fullscreen_toggle.just_pressed {
        commands.trigger(SwitchFullScreenEvent {});
    }
}
