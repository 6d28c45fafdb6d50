//! Debug overlay toggle.
//!
//! While this resource exists the renderer outlines colliders, marks entity
//! positions and prints stage internals. F11 or `--debug` inserts it.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the debug overlay is on.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
