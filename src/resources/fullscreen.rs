//! Fullscreen toggle.
//!
//! Present while the window is fullscreen. The observer that flips it also
//! flips the raylib window, and the resulting resize re-fits the camera.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the window is fullscreen.
#[derive(Resource, Clone, Copy, Debug)]
pub struct FullScreen {}
