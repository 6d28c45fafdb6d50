//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the hook registered for the new state in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! | State      | Hook          |
//! |------------|---------------|
//! | `Setup`    | `setup`       |
//! | `Playing`  | `enter_play`  |
//! | `Quitting` | `quit_game`   |
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// If [`NextGameState`] holds [`Pending`], the observer updates
/// [`GameState`], runs the enter hook and clears the request; if it is
/// [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            info!(
                "Transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            game_state.set(new_state.clone());
            next_game_state.reset();
            on_state_enter(&new_state, &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Run the hook registered for `state`, if any.
fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let hook = match state {
        GameStates::None => return,
        GameStates::Setup => "setup",
        GameStates::Playing => "enter_play",
        GameStates::Quitting => "quit_game",
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(*id),
        None => error!("{} system not found in SystemsStore", hook),
    }
}
