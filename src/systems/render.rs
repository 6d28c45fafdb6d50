//! Rendering.
//!
//! [`render_system`] is an exclusive system that draws one frame:
//!
//! 1. into the [`RenderTarget`] at the logical resolution:
//!    - world pass through the [`Camera2DRes`]: city tile layers in order
//!      (`colisao`, `chao`, `predios`), then sprites sorted by [`ZIndex`]
//!    - screen pass: damage overlay, HUD text, debug overlay
//! 2. into the window: the render target scaled to fit with
//!    letterbox/pillarbox bars.
//!
//! The raylib handle, thread and render target are NonSend resources; they
//! are taken out of the world for the duration of the frame so the world can
//! still be queried while a draw handle borrows the raylib handle.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::actors::DamageOverlay;
use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::citymap::CityMap;
use crate::resources::debugmode::DebugMode;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::stage::StageState;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;

/// Color a sprite or shape is drawn with: tint (or white) faded by opacity.
pub fn draw_color(tint: Option<&Tint>, opacity: Option<&Opacity>) -> Color {
    let tint = tint.copied().unwrap_or_default();
    tint.faded(opacity.map_or(1.0, |o| o.0))
}

fn draw_world<D: RaylibDraw>(world: &mut World, d: &mut D) {
    if let (Some(map), Some(textures)) = (
        world.get_resource::<CityMap>(),
        world.get_resource::<TextureStore>(),
    ) {
        if let Some(tileset) = textures.get("tileset") {
            for layer in map.draw_layers() {
                let tint = Tint::default().faded(layer.opacity);
                map.for_each_tile(layer, |dest, src| {
                    d.draw_texture_pro(tileset, src, dest, Vector2::zero(), 0.0, tint);
                });
            }
        }
    }

    let mut to_draw: Vec<(Sprite, Vector2, ZIndex, Color)> = {
        let mut q = world.query::<(
            &Sprite,
            &MapPosition,
            &ZIndex,
            Option<&Tint>,
            Option<&Opacity>,
        )>();
        q.iter(world)
            .filter(|(_, _, _, _, opacity)| !opacity.is_some_and(|o| o.is_hidden()))
            .map(|(s, p, z, tint, opacity)| (s.clone(), p.pos, *z, draw_color(tint, opacity)))
            .collect()
    };
    to_draw.sort_by_key(|(_, _, z, _)| *z);

    let textures = world.get_resource::<TextureStore>();
    for (sprite, pos, _z, color) in to_draw.iter() {
        let (w, h) = sprite.scaled_size();
        let origin = Vector2 {
            x: sprite.origin.x * sprite.scale,
            y: sprite.origin.y * sprite.scale,
        };
        let dest = Rectangle {
            x: pos.x,
            y: pos.y,
            width: w,
            height: h,
        };
        match textures.and_then(|t| t.get(&sprite.tex_key)) {
            Some(tex) => {
                let src = Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: tex.width as f32,
                    height: tex.height as f32,
                };
                d.draw_texture_pro(tex, src, dest, origin, 0.0, *color);
            }
            None => {
                let fallback = Tint {
                    color: sprite.fallback,
                }
                .multiply(*color);
                d.draw_rectangle_pro(dest, origin, 0.0, fallback);
            }
        }
    }

    if world.contains_resource::<DebugMode>() {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
        let mut positions = world.query::<&MapPosition>();
        for position in positions.iter(world) {
            let (x, y) = (position.pos.x as i32, position.pos.y as i32);
            d.draw_line(x - 5, y, x + 5, y, Color::GREEN);
            d.draw_line(x, y - 5, x, y + 5, Color::GREEN);
        }
    }
}

fn draw_screen<D: RaylibDraw>(world: &mut World, d: &mut D) {
    let mut overlays = world.query::<(&DamageOverlay, &ScreenPosition, Option<&Tint>, &Opacity)>();
    for (overlay, position, tint, opacity) in overlays.iter(world) {
        if opacity.is_hidden() {
            continue;
        }
        d.draw_rectangle(
            position.pos.x as i32,
            position.pos.y as i32,
            overlay.width as i32,
            overlay.height as i32,
            draw_color(tint, Some(opacity)),
        );
    }

    let mut texts: Vec<(DynamicText, Vector2, ZIndex, f32)> = world
        .query::<(&DynamicText, &ScreenPosition, Option<&ZIndex>, Option<&Opacity>)>()
        .iter(world)
        .filter(|(text, _, _, _)| !text.content.is_empty())
        .map(|(text, position, z, opacity)| {
            (
                text.clone(),
                position.pos,
                z.copied().unwrap_or(ZIndex(0)),
                opacity.map_or(1.0, |o| o.0),
            )
        })
        .collect();
    texts.sort_by_key(|(_, _, z, _)| *z);
    for (text, pos, _z, alpha) in texts.iter() {
        let color = Tint { color: text.color }.faded(*alpha);
        d.draw_text(&text.content, pos.x as i32, pos.y as i32, text.font_size, color);
    }
}

fn draw_debug<D: RaylibDraw>(world: &mut World, d: &mut D, fps: &str, screen_h: i32) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let entity_count = world.query::<Entity>().iter(world).count();
    let cam = world.resource::<Camera2DRes>().0;
    let lines = [
        format!("DEBUG (F11) | FPS: {} | Entities: {}", fps, entity_count),
        format!(
            "Camera ({:.1}, {:.1}) zoom {:.2}",
            cam.target.x, cam.target.y, cam.zoom
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, 10, screen_h - 40 + i as i32 * 12, 10, Color::YELLOW);
    }
    if let Some(stage) = world.get_resource::<StageState>() {
        let text = format!(
            "Stage {} | NPCs {} | target {:?} | escape {} | escaping {} | exploding {}",
            stage.stage_number,
            stage.npc_count,
            stage.target_npc,
            stage.escape_enabled,
            stage.is_escaping,
            stage.is_exploding
        );
        d.draw_text(&text, 10, screen_h - 64, 10, Color::YELLOW);
    }
}

/// Draw one frame. Does nothing until setup has inserted the camera.
pub fn render_system(world: &mut World) {
    if !world.contains_resource::<Camera2DRes>() {
        return;
    }
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let Some(mut target) = world.remove_non_send_resource::<RenderTarget>() else {
        world.insert_non_send_resource(th);
        world.insert_non_send_resource(rl);
        return;
    };

    let camera = world.resource::<Camera2DRes>().0;
    let window = world
        .get_resource::<WindowSize>()
        .copied()
        .unwrap_or(WindowSize {
            w: rl.get_screen_width(),
            h: rl.get_screen_height(),
        });
    let fps = rl.get_fps().to_string();
    let screen_h = target.game_height as i32;

    {
        let mut d = rl.begin_texture_mode(&th, &mut target.texture);
        d.clear_background(Color::BLACK);
        {
            let mut d2 = d.begin_mode2D(camera);
            draw_world(world, &mut d2);
        }
        draw_screen(world, &mut d);
        draw_debug(world, &mut d, &fps, screen_h);
    }

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::BLACK);
        let dest = window.calculate_letterbox(target.game_width, target.game_height);
        d.draw_texture_pro(
            target.texture.texture(),
            target.source_rect(),
            dest,
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
    }

    world.insert_non_send_resource(target);
    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_color_defaults_to_opaque_white() {
        let c = draw_color(None, None);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 255, 255, 255));
    }

    #[test]
    fn test_draw_color_applies_tint_and_opacity() {
        let tint = Tint::from_hex(0xff0000);
        let c = draw_color(Some(&tint), Some(&Opacity(0.0)));
        assert_eq!((c.r, c.g, c.b, c.a), (255, 0, 0, 0));
        let c = draw_color(Some(&tint), Some(&Opacity(1.0)));
        assert_eq!(c.a, 255);
    }
}
