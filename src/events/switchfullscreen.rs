//! Fullscreen toggle event and observer.
//!
//! Pressing **F10** triggers [`SwitchFullScreenEvent`], which is handled by
//! [`switch_fullscreen_observer`]. The observer toggles the window between
//! fullscreen and windowed mode, using the [`FullScreen`] marker resource to
//! track the current state. The main loop picks up the new window size on
//! the next frame and the viewport system re-fits the view.

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

/// Event triggered to toggle fullscreen mode.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchFullScreenEvent {}

/// Observer that toggles fullscreen mode when [`SwitchFullScreenEvent`] fires.
///
/// - If [`FullScreen`] exists: removes it, leaves fullscreen and restores
///   the configured window size.
/// - Otherwise: inserts it, sizes the window to the current monitor and
///   enters fullscreen.
pub fn switch_fullscreen_observer(
    _trigger: On<SwitchFullScreenEvent>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
    fullscreen: Option<Res<FullScreen>>,
    config: Res<GameConfig>,
) {
    if fullscreen.is_some() {
        commands.remove_resource::<FullScreen>();

        if rl.is_window_fullscreen() {
            rl.toggle_fullscreen();
            let (w, h) = config.window_size();
            rl.set_window_size(w as i32, h as i32);
            rl.restore_window();

            if !rl.is_window_fullscreen() {
                info!("Full screen disabled");
            } else {
                error!("Failed to disable full screen");
            }
        }
    } else {
        info!("Entering full screen mode");
        commands.insert_resource(FullScreen {});

        if !rl.is_window_fullscreen() {
            let monitor: i32 = unsafe { ffi::GetCurrentMonitor() };
            let monitor_width = unsafe { ffi::GetMonitorWidth(monitor) };
            let monitor_height = unsafe { ffi::GetMonitorHeight(monitor) };
            info!("Monitor dimensions: {}x{}", monitor_width, monitor_height);
            rl.set_window_size(monitor_width, monitor_height);

            #[cfg(not(target_os = "windows"))]
            rl.maximize_window();
            rl.toggle_fullscreen();

            if rl.is_window_fullscreen() {
                info!("Full screen enabled");
            } else {
                error!("Failed to enable full screen");
            }
        }
    }
}
