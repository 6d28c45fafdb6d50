//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, a [`TimerEvent`] is triggered for the entity. NPC roaming
//! listens for the `"npc_roam"` signal to alternate between walking and
//! standing still.
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::time::update_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

/// Event emitted when a timer expires.
///
/// The `entity` field identifies the entity with the timer, and `signal`
/// contains the signal name from the timer component.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The signal name configured on the timer.
    pub signal: String,
}
