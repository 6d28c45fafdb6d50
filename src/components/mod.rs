//! ECS components for entities.
//!
//! Submodules overview:
//! - [`actors`] – player, NPC, escape zone, HUD and overlay markers
//! - [`boxcollider`] – axis-aligned rectangular collider for overlap detection
//! - [`dynamictext`] – text component for rendering variable strings
//! - [`group`] – tag component naming the kind of an entity
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`opacity`] – alpha used for fades, flashes and the hidden escape zone
//! - [`persistent`] – marker for entities that survive stage restarts
//! - [`rigidbody`] – kinematic body storing velocity, plus world-bounds policy
//! - [`screenposition`] – screen-space position and anchors for UI elements
//! - [`sprite`] – 2D sprite rendering component
//! - [`timer`] – entity-bound timer that emits events when finished
//! - [`tint`] – color modulation
//! - [`tween`] – animated interpolation of position and opacity
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod actors;
pub mod boxcollider;
pub mod dynamictext;
pub mod group;
pub mod mapposition;
pub mod opacity;
pub mod persistent;
pub mod rigidbody;
pub mod screenposition;
pub mod sprite;
pub mod timer;
pub mod tint;
pub mod tween;
pub mod zindex;
