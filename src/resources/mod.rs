//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: stage state, scheduled tasks,
//! input, timing, rendering handles and asset stores.
//!
//! Overview
//! - `camera2d` – shared 2D camera used for world/screen transforms
//! - `citymap` – the Tiled city map: pixel size, layers, tileset
//! - `debugmode` – presence toggles the debug overlay
//! - `fullscreen` – presence means the window is fullscreen
//! - `gameconfig` – INI configuration, including stage tuning
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `rendertarget` – fixed-resolution framebuffer (NonSend)
//! - `rng` – seedable random number generator
//! - `scheduler` – cancellable one-shot and repeating stage tasks
//! - `screensize` – logical render resolution in pixels
//! - `stage` – counters and flags of the running stage
//! - `systemsstore` – registry of game state hooks by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `windowsize` – OS window size and letterbox math
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod citymap;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod rendertarget;
pub mod rng;
pub mod scheduler;
pub mod screensize;
pub mod stage;
pub mod systemsstore;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
