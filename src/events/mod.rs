//! Event types and observers.
//!
//! Events decouple the systems that notice something (a timer ran out, two
//! colliders overlap, a tween finished) from the stage logic that reacts.
//!
//! Submodules:
//! - [`collision`] – player/escape zone overlap
//! - [`gamestate`] – high-level state transitions and their hooks
//! - [`scheduled`] – scheduler tasks that came due
//! - [`stage`] – stage teardown and rebuild
//! - [`switchdebug`] – toggle the debug overlay
//! - [`switchfullscreen`] – toggle fullscreen
//! - [`timer`] – entity timers that expired
//! - [`tween`] – signalled tweens that finished
pub mod collision;
pub mod gamestate;
pub mod scheduled;
pub mod stage;
pub mod switchdebug;
pub mod switchfullscreen;
pub mod timer;
pub mod tween;
