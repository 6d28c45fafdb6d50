//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`collision`] – overlap checks between configured groups and event emission
//! - [`gameconfig`] – apply [`crate::resources::gameconfig::GameConfig`] changes at runtime
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`movement`] – integrate positions from rigid body velocities and keep bodies on the map
//! - [`render`] – draw the city, sprites, HUD and debug overlays using Raylib
//! - [`scheduler`] – fire due [`crate::resources::scheduler::Scheduler`] tasks as events
//! - [`stage`] – player control, stealing, escape and explosion rules
//! - [`time`] – update simulation time and delta, process timers
//! - [`tween`] – animate vertical offset and opacity over time
//! - [`viewport`] – fit the camera to the map and anchor screen-space entities

pub mod collision;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod movement;
pub mod render;
pub mod scheduler;
pub mod stage;
pub mod time;
pub mod tween;
pub mod viewport;
