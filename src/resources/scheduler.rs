//! Cancellable scheduled actions.
//!
//! The [`Scheduler`] resource replaces fire-and-forget delayed callbacks
//! with tasks that have an identity. Scheduling returns a [`TaskId`];
//! the holder can later [`cancel`](Scheduler::cancel) it, which is how the
//! steal dwell timer is disarmed when the player walks away.
//!
//! The [`update_scheduler`](crate::systems::scheduler::update_scheduler)
//! system advances the clock by the frame delta and triggers a
//! [`ScheduledEvent`](crate::events::scheduled::ScheduledEvent) for every
//! task that came due, in due-time order.

use bevy_ecs::prelude::Resource;

use crate::resources::stage::StageOutcome;

/// Identity of a scheduled task. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// What to do when a task comes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledAction {
    /// One second of the stage countdown elapsed.
    CountdownTick,
    /// The player stayed next to an NPC without stealing.
    StealDwellExpired,
    /// Tear the stage down and build it again.
    RestartStage(StageOutcome),
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    action: ScheduledAction,
    due_at: f64,
    interval: Option<f64>,
}

/// Pending one-shot and repeating tasks, keyed by [`TaskId`].
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, delay: f32, interval: Option<f32>, action: ScheduledAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            action,
            due_at: self.now + delay.max(0.0) as f64,
            interval: interval.map(|i| i as f64),
        });
        id
    }

    /// Run `action` once, `delay` seconds from now.
    pub fn schedule_once(&mut self, delay: f32, action: ScheduledAction) -> TaskId {
        self.push(delay, None, action)
    }

    /// Run `action` every `interval` seconds, first time `interval` seconds from now.
    ///
    /// Non-positive intervals are rejected by clamping to one millisecond.
    pub fn schedule_repeating(&mut self, interval: f32, action: ScheduledAction) -> TaskId {
        let interval = interval.max(0.001);
        self.push(interval, Some(interval), action)
    }

    /// Remove a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of pending tasks scheduled with `action`.
    pub fn count_of(&self, action: ScheduledAction) -> usize {
        self.tasks.iter().filter(|t| t.action == action).count()
    }

    /// Drop every pending task. The clock and id counter keep running.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Advance the clock by `dt` seconds and return the tasks that came due.
    ///
    /// One-shot tasks are removed. Repeating tasks are returned once per
    /// whole interval elapsed and stay pending.
    pub fn advance(&mut self, dt: f32) -> Vec<(TaskId, ScheduledAction)> {
        self.now += dt.max(0.0) as f64;
        let now = self.now;

        let mut due: Vec<(f64, TaskId, ScheduledAction)> = Vec::new();
        for task in self.tasks.iter_mut() {
            while task.due_at <= now {
                due.push((task.due_at, task.id, task.action));
                match task.interval {
                    Some(interval) => task.due_at += interval,
                    None => break,
                }
            }
        }
        self.tasks.retain(|t| t.interval.is_some() || t.due_at > now);

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, id, action)| (id, action)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_after_delay_and_is_removed() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(1.0, ScheduledAction::StealDwellExpired);
        assert!(s.advance(0.5).is_empty());
        assert!(s.is_pending(id));
        let fired = s.advance(0.5);
        assert_eq!(fired, vec![(id, ScheduledAction::StealDwellExpired)]);
        assert!(!s.is_pending(id));
        assert!(s.advance(5.0).is_empty());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(1.0, ScheduledAction::StealDwellExpired);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.advance(2.0).is_empty());
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut s = Scheduler::new();
        let id = s.schedule_repeating(1.0, ScheduledAction::CountdownTick);
        assert_eq!(s.advance(1.0).len(), 1);
        assert_eq!(s.advance(2.5).len(), 2);
        assert!(s.is_pending(id));
        assert_eq!(s.advance(0.5).len(), 1);
    }

    #[test]
    fn test_due_order_follows_due_time() {
        let mut s = Scheduler::new();
        let late = s.schedule_once(0.9, ScheduledAction::RestartStage(StageOutcome::Failed));
        let early = s.schedule_once(0.1, ScheduledAction::StealDwellExpired);
        let fired: Vec<TaskId> = s.advance(1.0).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![early, late]);
    }

    #[test]
    fn test_ids_are_unique_after_clear() {
        let mut s = Scheduler::new();
        let a = s.schedule_once(1.0, ScheduledAction::CountdownTick);
        s.clear();
        assert!(s.is_empty());
        let b = s.schedule_once(1.0, ScheduledAction::CountdownTick);
        assert_ne!(a, b);
    }

    #[test]
    fn test_delay_is_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.advance(10.0);
        s.schedule_once(1.0, ScheduledAction::StealDwellExpired);
        assert!(s.advance(0.75).is_empty());
        assert_eq!(s.count_of(ScheduledAction::StealDwellExpired), 1);
        assert_eq!(s.advance(0.25).len(), 1);
    }
}
