//! Collision event type.
//!
//! The collision system emits [`CollisionEvent`] whenever a player collider
//! overlaps the escape zone collider. The stage controller reacts to it in
//! [`escape_zone_observer`](crate::systems::stage::escape_zone_observer).

use bevy_ecs::prelude::*;

/// Event fired when two entities with BoxCollider overlap.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
