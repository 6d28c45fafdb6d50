//! Viewport fitting.
//!
//! The world is drawn into a fixed logical surface ([`ScreenSize`]) that the
//! renderer letterboxes into the window. [`viewport_system`] keeps the camera
//! showing the whole city map on that surface: it runs whenever the window,
//! the logical size or the map changed, or when new anchored entities were
//! spawned by a stage (re)start.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::actors::{DamageOverlay, EscapeZone};
use crate::components::mapposition::MapPosition;
use crate::components::screenposition::{ScreenAnchor, ScreenPosition};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::citymap::CityMap;
use crate::resources::screensize::ScreenSize;
use crate::resources::windowsize::WindowSize;

/// Largest zoom at which a `map_w` x `map_h` map fits a `view_w` x `view_h` view.
pub fn fit_zoom(view_w: f32, view_h: f32, map_w: f32, map_h: f32) -> f32 {
    if map_w <= 0.0 || map_h <= 0.0 {
        return 1.0;
    }
    (view_w / map_w).min(view_h / map_h)
}

#[allow(clippy::too_many_arguments)]
pub fn viewport_system(
    map: Option<Res<CityMap>>,
    screen: Res<ScreenSize>,
    window: Option<Res<WindowSize>>,
    mut camera: ResMut<Camera2DRes>,
    mut zones: Query<&mut MapPosition, With<EscapeZone>>,
    mut anchored: Query<(&ScreenAnchor, &mut ScreenPosition)>,
    mut overlays: Query<&mut DamageOverlay>,
    spawned: Query<(), Or<(Added<ScreenAnchor>, Added<DamageOverlay>, Added<EscapeZone>)>>,
) {
    let Some(map) = map else {
        return;
    };
    let resized = screen.is_changed() || window.as_ref().is_some_and(|w| w.is_changed());
    if !resized && !map.is_changed() && spawned.is_empty() {
        return;
    }

    let (view_w, view_h) = (screen.w as f32, screen.h as f32);
    let (cx, cy) = map.center();
    let zoom = fit_zoom(view_w, view_h, map.width_px(), map.height_px());

    let cam = &mut camera.0;
    cam.zoom = zoom;
    cam.target = Vector2 { x: cx, y: cy };
    cam.offset = Vector2 {
        x: view_w * 0.5,
        y: view_h * 0.5,
    };
    cam.rotation = 0.0;

    for mut zone in zones.iter_mut() {
        zone.pos = Vector2 { x: cx, y: cy };
    }
    for (anchor, mut position) in anchored.iter_mut() {
        position.set(anchor.x, anchor.y);
    }
    for mut overlay in overlays.iter_mut() {
        overlay.width = view_w;
        overlay.height = view_h;
    }

    debug!(
        "Viewport fitted: view {}x{}, map {}x{}, zoom {:.3}",
        view_w,
        view_h,
        map.width_px(),
        map.height_px(),
        zoom
    );
}
