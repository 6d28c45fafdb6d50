//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of an entity in map
//! pixels per second. The movement system integrates it into
//! [`MapPosition`](super::mapposition::MapPosition).
//!
//! The `frozen` flag disables movement and input control, used when the
//! player explodes.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing a velocity.
#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in map pixels per second.
    pub velocity: Vector2,
    /// When true, the movement system skips this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            frozen: false,
        }
    }

    /// Create a RigidBody already moving at the given velocity.
    pub fn with_velocity(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vector2 { x: vx, y: vy },
            frozen: false,
        }
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity.x = vx;
        self.velocity.y = vy;
    }

    /// Zero the velocity.
    pub fn stop(&mut self) {
        self.set_velocity(0.0, 0.0);
    }

    /// Stop and keep the body from moving until [`unfreeze`](Self::unfreeze).
    pub fn freeze(&mut self) {
        self.stop();
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

/// How a body reacts to the edges of the map.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldBounds {
    /// Position is clamped to the map rectangle.
    Clamp,
    /// Position is clamped and the velocity component on that axis is reflected.
    Bounce,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigidbody_new_is_at_rest() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity.x, 0.0);
        assert_eq!(rb.velocity.y, 0.0);
        assert!(!rb.frozen);
    }

    #[test]
    fn test_with_velocity() {
        let rb = RigidBody::with_velocity(-20.0, 35.0);
        assert_eq!(rb.velocity.x, -20.0);
        assert_eq!(rb.velocity.y, 35.0);
    }

    #[test]
    fn test_freeze_stops_body() {
        let mut rb = RigidBody::with_velocity(90.0, 150.0);
        rb.freeze();
        assert!(rb.frozen);
        assert_eq!(rb.velocity.x, 0.0);
        assert_eq!(rb.velocity.y, 0.0);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}
