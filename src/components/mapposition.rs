//! World-space position component.
//!
//! [`MapPosition`] is the pivot of an entity in map pixels. The camera maps
//! it to the logical screen; UI elements use
//! [`ScreenPosition`](super::screenposition::ScreenPosition) instead.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Pivot position of an entity in map (world) pixels.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Euclidean distance to another map position.
    pub fn distance_to(&self, other: &MapPosition) -> f32 {
        let dx = self.pos.x - other.pos.x;
        let dy = self.pos.y - other.pos.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = MapPosition::new(0.0, 0.0);
        let b = MapPosition::new(30.0, 40.0);
        assert!((a.distance_to(&b) - 50.0).abs() < 1e-6);
        assert!((b.distance_to(&a) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = MapPosition::new(12.5, -3.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
