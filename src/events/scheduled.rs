//! Scheduled task events.
//!
//! [`update_scheduler`](crate::systems::scheduler::update_scheduler) triggers
//! one [`ScheduledEvent`] per task that came due this frame. The stage
//! controller observes them in
//! [`scheduled_action_observer`](crate::systems::stage::scheduled_action_observer).

use bevy_ecs::prelude::*;

use crate::resources::scheduler::{ScheduledAction, TaskId};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Task that fired. Repeating tasks fire with the same id every time.
    pub task: TaskId,
    pub action: ScheduledAction,
}
