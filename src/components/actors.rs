//! Marker and state components for the actors of a stage.
//!
//! - [`Player`] – the controllable thief
//! - [`Npc`] – a pedestrian that can be stolen from, with its roam state
//! - [`EscapeZone`] – the exit door that unlocks after every NPC is robbed
//! - [`HudText`] – which HUD line a text entity is
//! - [`DamageOverlay`] – full-screen rectangle flashed on explosion

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Phase of an NPC's move/pause cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Roam {
    Moving,
    Paused,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Npc {
    pub roam: Roam,
}

impl Default for Npc {
    fn default() -> Self {
        Npc { roam: Roam::Moving }
    }
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct EscapeZone;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudText {
    /// "Press E to steal".
    StealPrompt,
    /// Directives and stage messages.
    Message,
    /// "Time: N".
    Countdown,
}

/// Full-screen overlay; its size follows the logical screen.
#[derive(Component, Clone, Copy, Debug)]
pub struct DamageOverlay {
    pub width: f32,
    pub height: f32,
}
