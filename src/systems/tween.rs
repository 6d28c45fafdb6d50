//! Tween animation systems.
//!
//! These systems update entity properties over time based on tween components:
//! - [`tween_position_y_system`] – animates the y of [`MapPosition`]
//! - [`tween_opacity_system`] – animates [`Opacity`]
//!
//! Both sample a [`TweenTrack`] with [`sample`]. When a track finishes the
//! property is left at its final value, the component is removed and, if the
//! tween carries a signal, a [`TweenFinishedEvent`] is triggered.

use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::tween::{Easing, TweenOpacity, TweenPositionY, TweenTrack};
use crate::events::tween::TweenFinishedEvent;
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Linearly interpolate between two floats.
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Value of `track` at its current `elapsed` time.
///
/// The yoyo leg replays the forward curve backwards, so a quad-out jump
/// decelerates into the apex and accelerates out of it.
pub fn sample(track: &TweenTrack) -> f32 {
    let progress = |t: f32| {
        if track.duration <= 0.0 {
            1.0
        } else {
            t / track.duration
        }
    };
    if !track.yoyo || track.elapsed <= track.duration {
        return lerp_f32(track.from, track.to, ease(track.easing, progress(track.elapsed)));
    }
    let back = track.elapsed - track.duration - track.hold;
    if back <= 0.0 {
        return track.to;
    }
    lerp_f32(
        track.from,
        track.to,
        ease(track.easing, 1.0 - progress(back)),
    )
}

/// Advance a track by `dt`. Returns true once it has finished.
fn step(track: &mut TweenTrack, dt: f32) -> bool {
    track.elapsed = (track.elapsed + dt).min(track.total_duration());
    track.is_finished()
}

fn finish(commands: &mut Commands, entity: Entity, signal: &Option<String>) {
    if let Some(signal) = signal {
        commands.trigger(TweenFinishedEvent {
            entity,
            signal: signal.clone(),
        });
    }
}

/// Animate the y coordinate of entities with [`TweenPositionY`].
pub fn tween_position_y_system(
    mut commands: Commands,
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut MapPosition, &mut TweenPositionY)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut mp, mut tw) in query.iter_mut() {
        let done = step(&mut tw.track, dt);
        mp.pos.y = sample(&tw.track);
        if done {
            commands.entity(entity).remove::<TweenPositionY>();
            finish(&mut commands, entity, &tw.signal);
        }
    }
}

/// Animate [`Opacity`] of entities with [`TweenOpacity`].
pub fn tween_opacity_system(
    mut commands: Commands,
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Opacity, &mut TweenOpacity)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut opacity, mut tw) in query.iter_mut() {
        let done = step(&mut tw.track, dt);
        opacity.0 = sample(&tw.track).clamp(0.0, 1.0);
        if done {
            commands.entity(entity).remove::<TweenOpacity>();
            finish(&mut commands, entity, &tw.signal);
        }
    }
}
