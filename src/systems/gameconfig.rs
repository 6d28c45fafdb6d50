//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies settings to the window,
//! render target, screen size and stage tuning.

use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::stage::StageState;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

/// System that applies game configuration changes.
///
/// When [`GameConfig`] is added or modified:
/// 1. recreates the render target and updates [`ScreenSize`] if the render
///    resolution changed (the viewport system then re-fits the camera)
/// 2. toggles fullscreen if the window disagrees with the config
/// 3. applies vsync and the FPS cap
/// 4. hands the stage tuning to [`StageState`]
///
/// # Resource Dependencies
/// - `RaylibHandle` (non-send, mutable) - for window operations
/// - `RaylibThread` (non-send) - required for render texture recreation
/// - `RenderTarget` (non-send, mutable) - for render resolution changes
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
    mut screen_size: ResMut<ScreenSize>,
    stage: Option<ResMut<StageState>>,
    fullscreen: Option<Res<FullScreen>>,
    mut commands: Commands,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !config.is_changed() {
        return;
    }

    if !render_target.matches(config.render_width, config.render_height) {
        info!(
            "Resizing render target: {}x{} -> {}x{}",
            render_target.game_width,
            render_target.game_height,
            config.render_width,
            config.render_height
        );
        if let Err(e) =
            render_target.recreate(&mut rl, &th, config.render_width, config.render_height)
        {
            error!("Failed to resize render target: {}", e);
        } else {
            screen_size.w = config.render_width as i32;
            screen_size.h = config.render_height as i32;
        }
    }

    if config.fullscreen != fullscreen.is_some() {
        info!(
            "Fullscreen mismatch: config={}, window={} - triggering toggle",
            config.fullscreen,
            fullscreen.is_some()
        );
        commands.trigger(SwitchFullScreenEvent {});
    }

    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }
    rl.set_target_fps(config.target_fps);

    if let Some(mut stage) = stage {
        if *stage.tuning() != config.stage {
            stage.set_tuning(config.stage);
        }
    }

    info!("GameConfig changes applied.");
}
