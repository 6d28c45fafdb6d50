use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned box collider, centred on the entity's map position.
///
/// `offset` displaces the box centre from the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2 {
                x: width,
                y: height,
            },
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let cx = position.x + self.offset.x;
        let cy = position.y + self.offset.y;
        let hw = self.size.x.abs() * 0.5;
        let hh = self.size.y.abs() * 0.5;
        (
            Vector2 {
                x: cx - hw,
                y: cy - hh,
            },
            Vector2 {
                x: cx + hw,
                y: cy + hh,
            },
        )
    }

    /// (x, y, width, height) of the AABB, handy for debug drawing.
    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2 { x, y }
    }

    #[test]
    fn test_aabb_is_centred() {
        let c = BoxCollider::new(10.0, 20.0);
        let (min, max) = c.aabb(v(100.0, 100.0));
        assert_eq!((min.x, min.y), (95.0, 90.0));
        assert_eq!((max.x, max.y), (105.0, 110.0));
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(v(0.0, 0.0), &b, v(9.0, 0.0)));
        assert!(!a.overlaps(v(0.0, 0.0), &b, v(10.0, 0.0)));
        assert!(!a.overlaps(v(0.0, 0.0), &b, v(0.0, 25.0)));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let c = BoxCollider::new(-4.0, -4.0);
        let (x, y, w, h) = c.get_aabb(v(0.0, 0.0));
        assert_eq!((x, y, w, h), (-2.0, -2.0, 4.0, 4.0));
    }
}
