//! Collision detection.
//!
//! [`collision_detector`] checks every pair of [`BoxCollider`] entities
//! whose [`Group`]s form one of the [`COLLISION_PAIRS`] and triggers a
//! [`CollisionEvent`] for each overlapping pair, every frame they overlap.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::events::collision::CollisionEvent;

/// Group pairs that are tested against each other.
pub const COLLISION_PAIRS: [(&str, &str); 1] = [("player", "escape_zone")];

fn pair_is_tracked(a: &Group, b: &Group) -> bool {
    COLLISION_PAIRS.iter().any(|(x, y)| {
        (a.name() == *x && b.name() == *y) || (a.name() == *y && b.name() == *x)
    })
}

pub fn collision_detector(
    mut commands: Commands,
    query: Query<(Entity, &MapPosition, &BoxCollider, &Group)>,
) {
    for [(entity_a, pos_a, col_a, group_a), (entity_b, pos_b, col_b, group_b)] in
        query.iter_combinations()
    {
        if !pair_is_tracked(group_a, group_b) {
            continue;
        }
        if col_a.overlaps(pos_a.pos, col_b, pos_b.pos) {
            commands.trigger(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}
