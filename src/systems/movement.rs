//! Movement systems.
//!
//! - [`movement_system`] integrates [`RigidBody`] velocity into
//!   [`MapPosition`] for bodies that are not frozen.
//! - [`world_bounds_system`] keeps bodies inside the city map according to
//!   their [`WorldBounds`] policy.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{RigidBody, WorldBounds};
use crate::resources::citymap::CityMap;
use crate::resources::worldtime::WorldTime;

pub fn movement_system(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let delta = rigidbody.velocity.scale_by(time.delta);
        position.pos = position.pos + delta;
    }
}

/// Resolve one axis against `[min, max]`. Returns the new coordinate and
/// whether the body hit an edge while moving towards it.
fn resolve_axis(pos: f32, half: f32, min: f32, max: f32, velocity: f32) -> (f32, bool) {
    let lo = min + half;
    let hi = (max - half).max(lo);
    if pos < lo {
        (lo, velocity < 0.0)
    } else if pos > hi {
        (hi, velocity > 0.0)
    } else {
        (pos, false)
    }
}

/// Clamp or bounce bodies at the map edges.
///
/// The body's extent is its [`BoxCollider`] when it has one, otherwise its
/// pivot point. Bouncing reflects the velocity component with factor 1.
pub fn world_bounds_system(
    map: Option<Res<CityMap>>,
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &WorldBounds,
        Option<&BoxCollider>,
    )>,
) {
    let Some(map) = map else {
        return;
    };
    let (w, h) = (map.width_px(), map.height_px());
    for (mut position, mut body, bounds, collider) in query.iter_mut() {
        let (hw, hh) = collider
            .map(|c| (c.size.x.abs() * 0.5, c.size.y.abs() * 0.5))
            .unwrap_or((0.0, 0.0));
        let (x, hit_x) = resolve_axis(position.pos.x, hw, 0.0, w, body.velocity.x);
        let (y, hit_y) = resolve_axis(position.pos.y, hh, 0.0, h, body.velocity.y);
        if x != position.pos.x || y != position.pos.y {
            position.pos.x = x;
            position.pos.y = y;
        }
        if *bounds == WorldBounds::Bounce {
            if hit_x {
                body.velocity.x = -body.velocity.x;
            }
            if hit_y {
                body.velocity.y = -body.velocity.y;
            }
        }
    }
}
