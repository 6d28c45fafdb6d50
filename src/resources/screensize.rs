//! Logical screen size resource.
//!
//! Dimensions of the render target in pixels (400x400 by default). The HUD
//! is laid out in these coordinates and the camera offset is half of them.

use bevy_ecs::prelude::Resource;

/// Logical screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
