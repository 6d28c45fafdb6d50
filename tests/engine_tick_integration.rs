//! Engine tick integration tests for movement, bounds, timers, tweens, collision,
//! the scheduler and the viewport.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use pickpocket::components::actors::{DamageOverlay, EscapeZone};
use pickpocket::components::boxcollider::BoxCollider;
use pickpocket::components::group::Group;
use pickpocket::components::mapposition::MapPosition;
use pickpocket::components::opacity::Opacity;
use pickpocket::components::rigidbody::{RigidBody, WorldBounds};
use pickpocket::components::screenposition::{ScreenAnchor, ScreenPosition};
use pickpocket::components::timer::Timer;
use pickpocket::components::tween::{TweenOpacity, TweenPositionY, TweenTrack};
use pickpocket::events::collision::CollisionEvent;
use pickpocket::events::scheduled::ScheduledEvent;
use pickpocket::events::timer::TimerEvent;
use pickpocket::events::tween::TweenFinishedEvent;
use pickpocket::resources::camera2d::Camera2DRes;
use pickpocket::resources::citymap::CityMap;
use pickpocket::resources::scheduler::{ScheduledAction, Scheduler};
use pickpocket::resources::screensize::ScreenSize;
use pickpocket::resources::worldtime::WorldTime;
use pickpocket::systems::collision::collision_detector;
use pickpocket::systems::movement::{movement_system, world_bounds_system};
use pickpocket::systems::scheduler::update_scheduler;
use pickpocket::systems::time::{update_timers, update_world_time};
use pickpocket::systems::tween::{tween_opacity_system, tween_position_y_system};
use pickpocket::systems::viewport::viewport_system;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A `width` x `height` tile map of 8 px tiles with the city tileset and no tiles.
fn blank_map(width: u32, height: u32) -> CityMap {
    let cells = vec![0u32; (width * height) as usize];
    let json = serde_json::json!({
        "width": width,
        "height": height,
        "tilewidth": 8,
        "tileheight": 8,
        "layers": [
            { "name": "chao", "type": "tilelayer", "width": width, "height": height, "data": cells }
        ],
        "tilesets": [
            { "firstgid": 1, "name": "city-tileset", "image": "tilemap.png",
              "tilewidth": 8, "tileheight": 8, "spacing": 1, "columns": 4, "tilecount": 16 }
        ]
    });
    CityMap::from_json(&json.to_string(), "assets/maps/test.json").expect("valid test map")
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(ScreenSize { w: 400, h: 400 });
    world
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement_system);
    schedule.run(world);
}

fn tick_world_bounds(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(world_bounds_system);
    schedule.run(world);
}

fn tick_timers(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(update_timers);
    schedule.run(world);
}

fn tick_tween_opacity(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(tween_opacity_system);
    schedule.run(world);
}

fn tick_tween_position_y(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(tween_position_y_system);
    schedule.run(world);
}

fn tick_collision_detector(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(world);
}

fn tick_scheduler(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(update_scheduler);
    schedule.run(world);
}

fn tick_viewport(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(viewport_system);
    schedule.run(world);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world(0.0);
    let entity = world
        .spawn((MapPosition::new(0.0, 0.0), RigidBody::with_velocity(10.0, -4.0)))
        .id();

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, -2.0));
}

#[test]
fn movement_skips_frozen_bodies() {
    let mut world = make_world(0.0);
    let mut body = RigidBody::with_velocity(90.0, 0.0);
    body.frozen = true;
    let entity = world.spawn((MapPosition::new(7.0, 7.0), body)).id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 7.0));
}

#[test]
fn time_scale_zero_freezes_movement() {
    let mut world = make_world(0.0);
    world.resource_mut::<WorldTime>().time_scale = 0.0;
    let entity = world
        .spawn((MapPosition::new(1.0, 1.0), RigidBody::with_velocity(100.0, 100.0)))
        .id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0));
    assert!(approx_eq(pos.pos.y, 1.0));
}

#[test]
fn world_bounds_clamp_keeps_collider_inside_map() {
    let mut world = make_world(0.0);
    world.insert_resource(blank_map(10, 10));
    let entity = world
        .spawn((
            MapPosition::new(-20.0, 95.0),
            RigidBody::with_velocity(-90.0, 90.0),
            WorldBounds::Clamp,
            BoxCollider::new(16.0, 24.0),
        ))
        .id();

    tick_world_bounds(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 8.0));
    assert!(approx_eq(pos.pos.y, 68.0));
    let body = world.get::<RigidBody>(entity).unwrap();
    assert!(approx_eq(body.velocity.x, -90.0));
}

#[test]
fn world_bounds_bounce_reflects_velocity() {
    let mut world = make_world(0.0);
    world.insert_resource(blank_map(10, 10));
    let entity = world
        .spawn((
            MapPosition::new(85.0, 40.0),
            RigidBody::with_velocity(30.0, -12.0),
            WorldBounds::Bounce,
        ))
        .id();

    tick_world_bounds(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 80.0));
    let body = world.get::<RigidBody>(entity).unwrap();
    assert!(approx_eq(body.velocity.x, -30.0));
    assert!(approx_eq(body.velocity.y, -12.0));
}

// =============================================================================
// Timers
// =============================================================================

fn record_timer_events(world: &mut World) -> Arc<Mutex<Vec<TimerEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<TimerEvent>| {
        seen_clone.lock().unwrap().push(trigger.event().clone());
    });
    world.flush();
    seen
}

#[test]
fn one_shot_timer_fires_once_and_is_removed() {
    let mut world = make_world(0.0);
    let seen = record_timer_events(&mut world);
    let entity = world.spawn(Timer::new(0.5, "ring")).id();

    update_world_time(&mut world, 0.3);
    tick_timers(&mut world);
    assert!(seen.lock().unwrap().is_empty());

    update_world_time(&mut world, 0.3);
    tick_timers(&mut world);
    let events = seen.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, entity);
    assert_eq!(events[0].signal, "ring");
    assert!(world.get::<Timer>(entity).is_none());
}

#[test]
fn repeating_timer_fires_every_period() {
    let mut world = make_world(0.0);
    let seen = record_timer_events(&mut world);
    let entity = world.spawn(Timer::repeating(1.0, "npc_roam")).id();

    update_world_time(&mut world, 2.5);
    tick_timers(&mut world);

    assert_eq!(seen.lock().unwrap().len(), 2);
    let timer = world.get::<Timer>(entity).unwrap();
    assert!(approx_eq(timer.elapsed, 0.5));
}

// =============================================================================
// Tweens
// =============================================================================

#[test]
fn tween_opacity_fades_and_signals_completion() {
    let mut world = make_world(0.0);
    let finished = Arc::new(Mutex::new(Vec::new()));
    let finished_clone = finished.clone();
    world.add_observer(move |trigger: On<TweenFinishedEvent>| {
        finished_clone.lock().unwrap().push(trigger.event().signal.clone());
    });
    world.flush();

    let entity = world
        .spawn((
            Opacity(1.0),
            TweenOpacity::new(TweenTrack::new(1.0, 0.0, 1.0)).with_signal("escape_faded"),
        ))
        .id();

    update_world_time(&mut world, 0.25);
    tick_tween_opacity(&mut world);
    assert!(approx_eq(world.get::<Opacity>(entity).unwrap().0, 0.75));
    assert!(finished.lock().unwrap().is_empty());

    update_world_time(&mut world, 1.0);
    tick_tween_opacity(&mut world);
    assert!(approx_eq(world.get::<Opacity>(entity).unwrap().0, 0.0));
    assert!(world.get::<TweenOpacity>(entity).is_none());
    assert_eq!(*finished.lock().unwrap(), vec!["escape_faded".to_string()]);
}

#[test]
fn jump_tween_goes_up_and_lands_back() {
    let mut world = make_world(0.0);
    let track = TweenTrack::new(100.0, 50.0, 0.2).with_yoyo(0.0);
    let entity = world
        .spawn((MapPosition::new(10.0, 100.0), TweenPositionY::new(track)))
        .id();

    update_world_time(&mut world, 0.2);
    tick_tween_position_y(&mut world);
    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.y, 50.0));

    update_world_time(&mut world, 0.2);
    tick_tween_position_y(&mut world);
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.y, 100.0));
    assert!(approx_eq(pos.pos.x, 10.0));
    assert!(world.get::<TweenPositionY>(entity).is_none());
}

// =============================================================================
// Collision
// =============================================================================

#[test]
fn collision_detector_only_reports_tracked_group_pairs() {
    let mut world = make_world(0.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<CollisionEvent>| {
        let event = trigger.event();
        seen_clone.lock().unwrap().push((event.a, event.b));
    });
    world.flush();

    let player = world
        .spawn((
            Group::new("player"),
            MapPosition::new(100.0, 100.0),
            BoxCollider::new(16.0, 24.0),
        ))
        .id();
    let zone = world
        .spawn((
            Group::new("escape_zone"),
            MapPosition::new(105.0, 100.0),
            BoxCollider::new(16.0, 24.0),
        ))
        .id();
    // Overlaps the player but is not a tracked pair.
    world.spawn((
        Group::new("npc"),
        MapPosition::new(100.0, 105.0),
        BoxCollider::new(16.0, 24.0),
    ));

    tick_collision_detector(&mut world);

    let pairs = seen.lock().unwrap().clone();
    assert_eq!(pairs.len(), 1);
    let (a, b) = pairs[0];
    assert!((a == player && b == zone) || (a == zone && b == player));
}

#[test]
fn collision_detector_ignores_separated_boxes() {
    let mut world = make_world(0.0);
    let count = Arc::new(Mutex::new(0usize));
    let count_clone = count.clone();
    world.add_observer(move |_trigger: On<CollisionEvent>| {
        *count_clone.lock().unwrap() += 1;
    });
    world.flush();

    world.spawn((
        Group::new("player"),
        MapPosition::new(0.0, 0.0),
        BoxCollider::new(16.0, 24.0),
    ));
    world.spawn((
        Group::new("escape_zone"),
        MapPosition::new(16.0, 0.0),
        BoxCollider::new(16.0, 24.0),
    ));

    tick_collision_detector(&mut world);
    assert_eq!(*count.lock().unwrap(), 0);
}

// =============================================================================
// Scheduler
// =============================================================================

#[test]
fn scheduler_fires_due_tasks_in_order_and_skips_cancelled() {
    let mut world = make_world(0.0);
    let fired = Arc::new(Mutex::new(Vec::new()));
    let fired_clone = fired.clone();
    world.add_observer(move |trigger: On<ScheduledEvent>| {
        fired_clone.lock().unwrap().push(trigger.event().action);
    });
    world.flush();

    let mut scheduler = Scheduler::new();
    let countdown = scheduler.schedule_repeating(1.0, ScheduledAction::CountdownTick);
    let dwell = scheduler.schedule_once(0.5, ScheduledAction::StealDwellExpired);
    let cancelled = scheduler.schedule_once(0.2, ScheduledAction::StealDwellExpired);
    assert!(scheduler.cancel(cancelled));
    world.insert_resource(scheduler);

    update_world_time(&mut world, 1.5);
    tick_scheduler(&mut world);

    assert_eq!(
        *fired.lock().unwrap(),
        vec![
            ScheduledAction::StealDwellExpired,
            ScheduledAction::CountdownTick
        ]
    );
    let scheduler = world.resource::<Scheduler>();
    assert!(scheduler.is_pending(countdown));
    assert!(!scheduler.is_pending(dwell));
}

// =============================================================================
// Viewport
// =============================================================================

#[test]
fn viewport_fits_map_and_centres_camera() {
    let mut world = make_world(0.0);
    world.insert_resource(ScreenSize { w: 400, h: 300 });
    world.insert_resource(blank_map(50, 50));
    world.insert_resource(Camera2DRes::default());
    let zone = world
        .spawn((EscapeZone, MapPosition::new(0.0, 0.0), Opacity::hidden()))
        .id();
    let overlay = world
        .spawn((
            DamageOverlay {
                width: 1.0,
                height: 1.0,
            },
            ScreenPosition::new(0.0, 0.0),
            ScreenAnchor::new(0.0, 0.0),
        ))
        .id();
    let hud = world
        .spawn((ScreenPosition::new(-1.0, -1.0), ScreenAnchor::new(10.0, 30.0)))
        .id();

    tick_viewport(&mut world);

    let cam = world.resource::<Camera2DRes>().0;
    assert!(approx_eq(cam.zoom, 0.75));
    assert!(approx_eq(cam.target.x, 200.0));
    assert!(approx_eq(cam.target.y, 200.0));
    assert!(approx_eq(cam.offset.x, 200.0));
    assert!(approx_eq(cam.offset.y, 150.0));

    let zone_pos = world.get::<MapPosition>(zone).unwrap().pos;
    assert!(approx_eq(zone_pos.x, 200.0) && approx_eq(zone_pos.y, 200.0));
    let overlay = world.get::<DamageOverlay>(overlay).unwrap();
    assert!(approx_eq(overlay.width, 400.0) && approx_eq(overlay.height, 300.0));
    let hud_pos = world.get::<ScreenPosition>(hud).unwrap().pos;
    assert!(approx_eq(hud_pos.x, 10.0) && approx_eq(hud_pos.y, 30.0));
}

#[test]
fn viewport_refits_after_resize() {
    let mut world = make_world(0.0);
    world.insert_resource(blank_map(50, 25));
    world.insert_resource(Camera2DRes::default());

    let mut schedule = Schedule::default();
    schedule.add_systems(viewport_system);
    schedule.run(&mut world);
    let cam = world.resource::<Camera2DRes>().0;
    assert!(approx_eq(cam.zoom, 1.0));
    assert!(approx_eq(cam.target.y, 100.0));

    world.clear_trackers();
    *world.resource_mut::<ScreenSize>() = ScreenSize { w: 800, h: 800 };
    schedule.run(&mut world);

    let cam = world.resource::<Camera2DRes>().0;
    assert!(approx_eq(cam.zoom, 2.0));
    assert!(approx_eq(cam.offset.x, 400.0));
    assert!(approx_eq(cam.offset.y, 400.0));
    assert!(approx_eq(cam.target.x, 200.0));
    assert!(approx_eq(cam.target.y, 100.0));
}
