//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores an entity's position in logical
//! screen pixels. HUD texts and the damage overlay use it so they stay put
//! while the camera zooms and recentres.
//!
//! For world-space entities, see
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Screen-space position (top-left) for an entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    /// 2D coordinates in logical screen pixels.
    pub pos: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ScreenPosition {
    /// Create a ScreenPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Set the entire position.
    pub fn set(&mut self, x: f32, y: f32) {
        self.pos.x = x;
        self.pos.y = y;
    }
}

/// Fixed screen coordinates an element is re-pinned to on every viewport change.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenAnchor {
    pub x: f32,
    pub y: f32,
}

impl ScreenAnchor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let pos = ScreenPosition::default();
        assert_eq!(pos.pos.x, 0.0);
        assert_eq!(pos.pos.y, 0.0);
    }

    #[test]
    fn test_set_overwrites_both_axes() {
        let mut pos = ScreenPosition::new(1.0, 2.0);
        pos.set(50.0, 10.0);
        assert_eq!(pos.pos.x, 50.0);
        assert_eq!(pos.pos.y, 10.0);
    }
}
