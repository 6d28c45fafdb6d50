//! Time update systems.
//!
//! - [`update_world_time`] advances the shared
//!   [`WorldTime`](crate::resources::worldtime::WorldTime) once per frame,
//!   applying `time_scale` to the provided delta.
//! - [`update_timers`] advances [`Timer`] components and triggers a
//!   [`TimerEvent`] for each expiry.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The function
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Advance entity timers and emit [`TimerEvent`]s.
///
/// A repeating timer fires once per whole period elapsed, so a long frame
/// never swallows a period. One-shot timers are removed after firing.
pub fn update_timers(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
) {
    let dt = time.delta.max(0.0);
    for (entity, mut timer) in query.iter_mut() {
        timer.elapsed += dt;
        while timer.duration > 0.0 && timer.elapsed >= timer.duration {
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
            if timer.repeating {
                timer.reset();
            } else {
                commands.entity(entity).remove::<Timer>();
                break;
            }
        }
    }
}
