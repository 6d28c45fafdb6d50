//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive stage restarts. The
//! stage teardown despawns everything else. Observers and registered
//! systems are marked with it.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that must outlive a stage.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
