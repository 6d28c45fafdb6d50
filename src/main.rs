//! Pickpocket main entry point.
//!
//! A small 2D stealing game written in Rust using:
//! - **raylib** for windowing and graphics
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The player walks a city map, steals from every wandering NPC before the
//! countdown runs out, then escapes through the door that appears in the
//! middle of the map. Each escape adds NPCs; running out of time or lingering
//! next to a victim blows the cover and restarts from the first stage.
//!
//! # Main Loop
//!
//! 1. Initialize raylib window, ECS world and resources
//! 2. Register state hooks and observers, enter the Setup state
//! 3. Run the main game loop:
//!    - Update input, tweens, movement, stage rules, collisions
//!    - Advance timers and the scheduler
//!    - Render the city and HUD into the render target, then to the window
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;

use pickpocket::components::persistent::Persistent;
use pickpocket::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use pickpocket::events::stage::stage_restart_observer;
use pickpocket::events::switchdebug::switch_debug_observer;
use pickpocket::events::switchfullscreen::switch_fullscreen_observer;
use pickpocket::game;
use pickpocket::resources::debugmode::DebugMode;
use pickpocket::resources::gameconfig::GameConfig;
use pickpocket::resources::gamestate::{GameState, GameStates, NextGameState};
use pickpocket::resources::input::InputState;
use pickpocket::resources::rendertarget::RenderTarget;
use pickpocket::resources::rng::GameRng;
use pickpocket::resources::screensize::ScreenSize;
use pickpocket::resources::systemsstore::SystemsStore;
use pickpocket::resources::windowsize::WindowSize;
use pickpocket::resources::worldtime::WorldTime;
use pickpocket::systems::collision::collision_detector;
use pickpocket::systems::gameconfig::apply_gameconfig_changes;
use pickpocket::systems::gamestate::{check_pending_state, state_is_playing};
use pickpocket::systems::input::{toggle_keys_system, update_input_state};
use pickpocket::systems::movement::{movement_system, world_bounds_system};
use pickpocket::systems::render::render_system;
use pickpocket::systems::scheduler::update_scheduler;
use pickpocket::systems::stage::{
    escape_unlock_system, escape_zone_observer, npc_roam_observer, player_control_system,
    proximity_system, scheduled_action_observer, steal_system, tween_finished_observer,
};
use pickpocket::systems::time::{update_timers, update_world_time};
use pickpocket::systems::tween::{tween_opacity_system, tween_position_y_system};
use pickpocket::systems::viewport::viewport_system;

/// Pickpocket: rob the crowd, then get out before anyone notices.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Path to the Tiled JSON city map (overrides the config file).
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Seed for NPC placement and roaming.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,
}

/// Register a one-shot hook, mark it Persistent so stage teardown keeps it,
/// and store it under `name`.
fn register_hook<M>(
    world: &mut World,
    store: &mut SystemsStore,
    name: &str,
    system: impl IntoSystem<(), (), M> + 'static,
) {
    let id = world.register_system(system);
    world.entity_mut(id.entity()).insert(Persistent);
    store.insert(name, id);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Pickpocket starting");
    // --------------- Configuration ---------------
    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default configuration: {}", e);
    }
    if let Some(map) = cli.map {
        config.map_path = map;
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Pickpocket")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- Render target for fixed-resolution rendering ---------------
    let render_width = config.render_width;
    let render_height = config.render_height;
    let render_target = match RenderTarget::new(&mut rl, &thread, render_width, render_height) {
        Ok(target) => target,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    // ScreenSize is the game's internal render resolution (updated by apply_gameconfig_changes)
    world.insert_resource(ScreenSize {
        w: render_width as i32,
        h: render_height as i32,
    });
    // WindowSize is the actual window dimensions (updated when it changes)
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(match cli.seed {
        Some(seed) => {
            log::info!("Using RNG seed {}", seed);
            GameRng::with_seed(seed)
        }
        None => GameRng::default(),
    });
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.insert_non_send_resource(render_target);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    // Game state systems store
    // NOTE: In bevy_ecs 0.18, registered systems are stored as entities.
    // We must mark them as Persistent so they survive stage restarts.
    let mut systems_store = SystemsStore::new();
    register_hook(&mut world, &mut systems_store, "setup", game::setup);
    register_hook(&mut world, &mut systems_store, "enter_play", game::enter_play);
    register_hook(&mut world, &mut systems_store, "spawn_stage", game::spawn_stage);
    register_hook(&mut world, &mut systems_store, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.flush();

    // Set next GameState to Setup
    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Setup);
    }
    world.trigger(GameStateChangedEvent {}); // Call inmediatly to enter Setup state

    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(switch_fullscreen_observer), Persistent));
    world.spawn((Observer::new(stage_restart_observer), Persistent));
    world.spawn((Observer::new(escape_zone_observer), Persistent));
    world.spawn((Observer::new(scheduled_action_observer), Persistent));
    world.spawn((Observer::new(tween_finished_observer), Persistent));
    world.spawn((Observer::new(npc_roam_observer), Persistent));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes.run_if(state_is_playing)); // Must run early to apply config before other systems
    update.add_systems(update_input_state);
    update.add_systems(toggle_keys_system.after(update_input_state));
    update.add_systems(check_pending_state);
    update.add_systems(
        (
            player_control_system,
            tween_position_y_system,
            tween_opacity_system,
            movement_system,
            world_bounds_system,
            proximity_system,
            steal_system,
            escape_unlock_system,
            collision_detector,
            update_timers,
            update_scheduler,
            viewport_system,
        )
            .chain()
            .run_if(state_is_playing)
            .after(update_input_state)
            .after(check_pending_state),
    );
    update.add_systems(render_system.after(viewport_system));

    if let Err(e) = update.initialize(&mut world) {
        log::error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        // Update window size (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        let window_size = *world.resource::<WindowSize>();
        if window_size.w != new_w || window_size.h != new_h {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    log::info!("Bye!");
}
