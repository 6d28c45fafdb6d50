//! Game setup and stage lifecycle.
//!
//! State hooks registered in [`SystemsStore`](crate::resources::systemsstore::SystemsStore):
//!
//! - [`setup`] (`"setup"`) loads textures and the city map, then requests
//!   [`GameStates::Playing`]. A map that cannot be loaded aborts the game.
//! - [`enter_play`] (`"enter_play"`) creates a fresh [`StageState`] and
//!   [`Scheduler`] and spawns the first stage.
//! - [`spawn_stage`] (`"spawn_stage"`) builds one stage: player, NPCs,
//!   hidden escape zone, HUD, damage overlay and the countdown task.
//! - [`quit_game`] (`"quit_game"`) logs the final counters.

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;

use crate::components::actors::{DamageOverlay, EscapeZone, HudText, Npc, Player};
use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::rigidbody::{RigidBody, WorldBounds};
use crate::components::screenposition::{ScreenAnchor, ScreenPosition};
use crate::components::sprite::Sprite;
use crate::components::timer::Timer;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::citymap::{CITY_LAYERS, CityMap};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::rng::GameRng;
use crate::resources::scheduler::{ScheduledAction, Scheduler};
use crate::resources::screensize::ScreenSize;
use crate::resources::stage::StageState;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::texturestore::TextureStore;
use crate::systems::stage::{NPC_ROAM_PERIOD, SIGNAL_NPC_ROAM, random_roam_velocity};

/// Textures loaded at setup, by key.
const TEXTURES: [(&str, &str); 3] = [
    ("player", "./assets/textures/player.png"),
    ("npc", "./assets/textures/npc.png"),
    ("door", "./assets/textures/door.png"),
];

/// Distance from the map edges inside which NPCs spawn.
const NPC_SPAWN_MARGIN: f32 = 50.0;
const COUNTDOWN_PERIOD: f32 = 1.0;

const ACTOR_SIZE: (f32, f32) = (16.0, 24.0);
const DOOR_SIZE: (f32, f32) = (32.0, 48.0);
const DOOR_SCALE: f32 = 0.5;

const Z_ZONE: i32 = 1;
const Z_NPC: i32 = 5;
const Z_PLAYER: i32 = 10;
const Z_OVERLAY: i32 = 90;
const Z_HUD: i32 = 100;

/// HUD lines: kind, fixed screen position, font size.
const HUD_LAYOUT: [(HudText, (f32, f32), i32); 3] = [
    (HudText::StealPrompt, (50.0, 10.0), 16),
    (HudText::Message, (10.0, 30.0), 12),
    (HudText::Countdown, (10.0, 50.0), 16),
];

fn load_textures(rl: &mut RaylibHandle, th: &RaylibThread, map: &CityMap) -> TextureStore {
    let mut store = TextureStore::new();
    let tileset_path = map.tileset_image_path();
    let tileset_path = tileset_path.to_string_lossy().into_owned();
    let entries = TEXTURES
        .iter()
        .map(|(key, path)| (*key, path.to_string()))
        .chain(std::iter::once(("tileset", tileset_path)));
    for (key, path) in entries {
        match rl.load_texture(th, &path) {
            Ok(texture) => {
                info!("Loaded texture '{}' from {}", key, path);
                store.insert(key, texture);
            }
            Err(e) => warn!("Failed to load texture '{}' from {}: {}", key, path, e),
        }
    }
    store
}

pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    config: Res<GameConfig>,
) {
    let map = match CityMap::load_from_file(&config.map_path) {
        Ok(map) => map,
        Err(e) => {
            error!("Cannot start without the city map: {}", e);
            next_state.set(GameStates::Quitting);
            return;
        }
    };
    info!(
        "City map loaded: {}x{} px, tileset '{}'",
        map.width_px(),
        map.height_px(),
        map.tileset().name
    );
    let layers = map.warn_missing_layers();
    info!("{} of {} city layers present", layers, CITY_LAYERS.len());

    let textures = load_textures(&mut rl, &th, &map);

    commands.insert_resource(textures);
    commands.insert_resource(map);
    commands.insert_resource(Camera2DRes::default());

    next_state.set(GameStates::Playing);
    info!("Game setup done, next state set to Playing");
}

pub fn enter_play(
    mut commands: Commands,
    config: Res<GameConfig>,
    systems_store: Res<SystemsStore>,
) {
    commands.insert_resource(StageState::new(config.stage));
    commands.insert_resource(Scheduler::new());
    match systems_store.get("spawn_stage") {
        Some(id) => commands.run_system(*id),
        None => error!("spawn_stage system not found in SystemsStore"),
    }
}

/// Build one stage from the current [`StageState`] counters.
pub fn spawn_stage(
    mut commands: Commands,
    map: Res<CityMap>,
    screen: Res<ScreenSize>,
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
    mut rng: ResMut<GameRng>,
) {
    stage.begin_stage();
    let (cx, cy) = map.center();
    let (map_w, map_h) = (map.width_px(), map.height_px());
    let (aw, ah) = ACTOR_SIZE;

    commands.spawn((
        Player,
        Group::new("player"),
        MapPosition::new(cx, cy),
        RigidBody::new(),
        WorldBounds::Clamp,
        BoxCollider::new(aw, ah),
        Sprite::centered("player", aw, ah).with_fallback(Color::WHITE),
        Tint::from_hex(0xff0000),
        Opacity::default(),
        ZIndex(Z_PLAYER),
    ));

    for _ in 0..stage.npc_count {
        let x = rng.range_f32(NPC_SPAWN_MARGIN, map_w - NPC_SPAWN_MARGIN);
        let y = rng.range_f32(NPC_SPAWN_MARGIN, map_h - NPC_SPAWN_MARGIN);
        let (vx, vy) = random_roam_velocity(&mut rng);
        commands.spawn((
            Npc::default(),
            Group::new("npc"),
            MapPosition::new(x, y),
            RigidBody::with_velocity(vx, vy),
            WorldBounds::Bounce,
            BoxCollider::new(aw, ah),
            Timer::repeating(NPC_ROAM_PERIOD, SIGNAL_NPC_ROAM),
            Sprite::centered("npc", aw, ah).with_fallback(Color::SKYBLUE),
            Opacity::default(),
            ZIndex(Z_NPC),
        ));
    }

    let (dw, dh) = DOOR_SIZE;
    commands.spawn((
        EscapeZone,
        Group::new("escape_zone"),
        MapPosition::new(cx, cy),
        BoxCollider::new(dw * DOOR_SCALE, dh * DOOR_SCALE),
        Sprite::centered("door", dw, dh)
            .with_scale(DOOR_SCALE)
            .with_fallback(Color::BROWN),
        Opacity::hidden(),
        ZIndex(Z_ZONE),
    ));

    for (kind, (x, y), size) in HUD_LAYOUT {
        let content = match kind {
            HudText::Countdown => stage.countdown_text(),
            _ => String::new(),
        };
        commands.spawn((
            kind,
            DynamicText::new(content, size, Color::WHITE),
            ScreenPosition::new(x, y),
            ScreenAnchor::new(x, y),
            Opacity::default(),
            ZIndex(Z_HUD),
        ));
    }

    commands.spawn((
        DamageOverlay {
            width: screen.w as f32,
            height: screen.h as f32,
        },
        ScreenPosition::new(0.0, 0.0),
        ScreenAnchor::new(0.0, 0.0),
        Tint::from_hex(0xff0000),
        Opacity::hidden(),
        ZIndex(Z_OVERLAY),
    ));

    let countdown = scheduler.schedule_repeating(COUNTDOWN_PERIOD, ScheduledAction::CountdownTick);
    stage.countdown = Some(countdown);

    info!(
        "Stage {} started: {} NPCs, {}s on the clock",
        stage.stage_number, stage.npc_count, stage.remaining_time
    );
}

pub fn quit_game(stage: Option<Res<StageState>>) {
    match stage {
        Some(stage) => info!(
            "Quitting on stage {} ({} NPCs)",
            stage.stage_number, stage.npc_count
        ),
        None => info!("Quitting before the first stage"),
    }
}
