//! Tween completion events.
//!
//! A finished tween that carries a signal triggers a [`TweenFinishedEvent`].
//! The stage controller uses them to sequence the jump, the escape fade and
//! the explosion flash.

use bevy_ecs::prelude::*;

/// Event emitted when a signalled tween completes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TweenFinishedEvent {
    /// Entity the tween was attached to.
    pub entity: Entity,
    /// Signal configured on the tween.
    pub signal: String,
}
