//! Entity-bound timer component.
//!
//! A [`Timer`] counts seconds and, when it reaches its duration, the
//! [`update_timers`](crate::systems::time::update_timers) system triggers a
//! [`TimerEvent`](crate::events::timer::TimerEvent) carrying the entity and
//! the timer's signal. Repeating timers keep running; one-shot timers are
//! removed from the entity once fired. Despawning the entity cancels it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub signal: String,
    pub repeating: bool,
}

impl Timer {
    /// One-shot timer.
    pub fn new(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            signal: signal.into(),
            repeating: false,
        }
    }

    /// Timer that fires every `duration` seconds.
    pub fn repeating(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            repeating: true,
            ..Timer::new(duration, signal)
        }
    }

    /// Subtract one period, keeping any overshoot.
    pub fn reset(&mut self) {
        self.elapsed = (self.elapsed - self.duration).max(0.0);
    }
}
