//! Shared 2D camera resource.
//!
//! Wraps raylib's [`Camera2D`] so the world render pass and the viewport
//! system agree on a single world/screen transform. The viewport system is
//! the only writer: it keeps the target on the map centre and the zoom at
//! the largest value that still shows the whole map.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource)]
pub struct Camera2DRes(pub Camera2D);

impl Default for Camera2DRes {
    fn default() -> Self {
        Camera2DRes(Camera2D {
            target: Vector2 { x: 0.0, y: 0.0 },
            offset: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}
