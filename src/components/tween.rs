//! Tween components for animated interpolation.
//!
//! This module provides components for smoothly animating entity properties
//! over time:
//! - [`TweenPositionY`] – animate the y coordinate of
//!   [`MapPosition`](super::mapposition::MapPosition) (the player's jump)
//! - [`TweenOpacity`] – animate [`Opacity`](super::opacity::Opacity) (fades and flashes)
//!
//! Both wrap a [`TweenTrack`], which supports multiple [`Easing`] functions
//! and an optional yoyo leg with a hold at the far end. A tween that
//! carries a `signal` triggers a
//! [`TweenFinishedEvent`](crate::events::tween::TweenFinishedEvent) when it
//! completes. See [`crate::systems::tween`] for the update systems.

use bevy_ecs::prelude::Component;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// A scalar interpolation from `from` to `to` over `duration` seconds.
///
/// With `yoyo` set, after reaching `to` the value stays there for `hold`
/// seconds and then plays back to `from` over another `duration`.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenTrack {
    /// Starting value.
    pub from: f32,
    /// Value at the end of the forward leg.
    pub to: f32,
    /// Duration of one leg in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Whether to play back to `from` after the forward leg.
    pub yoyo: bool,
    /// Seconds spent at `to` before the yoyo leg.
    pub hold: f32,
    /// Seconds played so far.
    pub elapsed: f32,
}

impl TweenTrack {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        TweenTrack {
            from,
            to,
            duration,
            easing: Easing::Linear,
            yoyo: false,
            hold: 0.0,
            elapsed: 0.0,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    /// Play back to `from` after holding `hold` seconds at `to`.
    pub fn with_yoyo(mut self, hold: f32) -> Self {
        self.yoyo = true;
        self.hold = hold.max(0.0);
        self
    }
    /// Length of the whole track including hold and yoyo leg.
    pub fn total_duration(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0 + self.hold
        } else {
            self.duration
        }
    }
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }
}

/// Animates the y coordinate of an entity's
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Clone, Debug)]
pub struct TweenPositionY {
    pub track: TweenTrack,
    /// Signal carried by the finish event, if any.
    pub signal: Option<String>,
}

impl TweenPositionY {
    pub fn new(track: TweenTrack) -> Self {
        Self {
            track,
            signal: None,
        }
    }
    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signal = Some(signal.into());
        self
    }
}

/// Animates an entity's [`Opacity`](super::opacity::Opacity).
#[derive(Component, Clone, Debug)]
pub struct TweenOpacity {
    pub track: TweenTrack,
    /// Signal carried by the finish event, if any.
    pub signal: Option<String>,
}

impl TweenOpacity {
    pub fn new(track: TweenTrack) -> Self {
        Self {
            track,
            signal: None,
        }
    }
    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signal = Some(signal.into());
        self
    }
}
