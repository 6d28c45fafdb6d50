//! Scheduler update system.

use bevy_ecs::prelude::*;
use log::trace;

use crate::events::scheduled::ScheduledEvent;
use crate::resources::scheduler::Scheduler;
use crate::resources::worldtime::WorldTime;

/// Advance the [`Scheduler`] by the frame delta and trigger a
/// [`ScheduledEvent`] for every task that came due, in due order.
pub fn update_scheduler(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut scheduler: ResMut<Scheduler>,
) {
    for (task, action) in scheduler.advance(time.delta.max(0.0)) {
        trace!("Scheduled task {:?} fired: {:?}", task, action);
        commands.trigger(ScheduledEvent { task, action });
    }
}
