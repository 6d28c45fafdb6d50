//! Stage controller.
//!
//! Per-frame systems, chained in this order every frame while playing:
//!
//! 1. [`player_control_system`] – velocity from the direction keys, run
//!    modifier, jump tween
//! 2. [`proximity_system`] – nearest NPC in steal range, steal prompt and
//!    the steal dwell task
//! 3. [`steal_system`] – despawn the targeted NPC on the steal key
//! 4. [`escape_unlock_system`] – reveal the escape zone once every NPC is gone
//!
//! Observers:
//!
//! - [`escape_zone_observer`] – player reached the unlocked escape zone
//! - [`scheduled_action_observer`] – countdown ticks, dwell expiry, restarts
//! - [`tween_finished_observer`] – jump landing, escape fade, explosion flash
//! - [`npc_roam_observer`] – alternate NPCs between walking and standing
//!
//! A stage ends either through the escape sequence (zone and message fade
//! out, zone despawns, restart with [`StageOutcome::Escaped`] a second
//! later) or the explosion sequence (player fades, overlay flashes, restart
//! with [`StageOutcome::Failed`] a second after the flash).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::actors::{DamageOverlay, EscapeZone, HudText, Npc, Player, Roam};
use crate::components::dynamictext::DynamicText;
use crate::components::mapposition::MapPosition;
use crate::components::opacity::Opacity;
use crate::components::rigidbody::RigidBody;
use crate::components::tween::{Easing, TweenOpacity, TweenPositionY, TweenTrack};
use crate::events::collision::CollisionEvent;
use crate::events::scheduled::ScheduledEvent;
use crate::events::stage::StageRestartEvent;
use crate::events::timer::TimerEvent;
use crate::events::tween::TweenFinishedEvent;
use crate::resources::input::InputState;
use crate::resources::rng::GameRng;
use crate::resources::scheduler::{ScheduledAction, Scheduler, TaskId};
use crate::resources::stage::{StageOutcome, StageState};

pub const STEAL_PROMPT: &str = "Press E to steal";
pub const ESCAPE_UNLOCKED: &str = "All robbed! Run to the exit!";
pub const STAGE_COMPLETE: &str = "Stage complete! Loading next stage...";
pub const EXPLODED: &str = "You exploded! Restarting...";

pub const SIGNAL_JUMP_LANDED: &str = "jump_landed";
pub const SIGNAL_ESCAPE_FADED: &str = "escape_faded";
pub const SIGNAL_FLASH_DONE: &str = "flash_done";
pub const SIGNAL_NPC_ROAM: &str = "npc_roam";

/// Largest NPC velocity component, in map pixels per second.
pub const NPC_ROAM_SPEED: f32 = 50.0;
/// Length of each roam phase (walking or standing).
pub const NPC_ROAM_PERIOD: f32 = 1.0;

const ESCAPE_FADE_SECS: f32 = 1.0;
const RESTART_DELAY_SECS: f32 = 1.0;
const PLAYER_FADE_SECS: f32 = 0.5;
const FLASH_PEAK: f32 = 0.7;
const FLASH_SECS: f32 = 0.3;
const FLASH_HOLD_SECS: f32 = 0.2;

type HudQuery<'w, 's> = Query<'w, 's, (Entity, &'static HudText, &'static mut DynamicText)>;

fn set_hud(hud: &mut HudQuery, which: HudText, text: &str) {
    for (_, kind, mut content) in hud.iter_mut() {
        if *kind == which && content.content != text {
            content.set_content(text);
        }
    }
}

fn hud_entity(hud: &HudQuery, which: HudText) -> Option<Entity> {
    hud.iter()
        .find(|(_, kind, _)| **kind == which)
        .map(|(entity, _, _)| entity)
}

/// Random roam velocity with both components in `[-NPC_ROAM_SPEED, NPC_ROAM_SPEED]`.
pub fn random_roam_velocity(rng: &mut GameRng) -> (f32, f32) {
    (
        rng.range_f32(-NPC_ROAM_SPEED, NPC_ROAM_SPEED),
        rng.range_f32(-NPC_ROAM_SPEED, NPC_ROAM_SPEED),
    )
}

/// The candidate strictly within `range` of `origin` that is nearest to it.
///
/// Ties go to the first candidate seen.
pub fn nearest_within<'a>(
    origin: &MapPosition,
    candidates: impl IntoIterator<Item = (Entity, &'a MapPosition)>,
    range: f32,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, position) in candidates {
        let distance = origin.distance_to(position);
        if distance >= range {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((entity, distance));
        }
    }
    best.map(|(entity, _)| entity)
}

/// Direction keys, run modifier and jump.
///
/// Left wins over right and up wins over down. Frozen players ignore input.
pub fn player_control_system(
    input: Res<InputState>,
    mut stage: ResMut<StageState>,
    mut commands: Commands,
    mut players: Query<(Entity, &MapPosition, &mut RigidBody), With<Player>>,
) {
    let tuning = *stage.tuning();
    for (entity, position, mut body) in players.iter_mut() {
        if body.frozen {
            continue;
        }
        let speed = if input.run.active {
            tuning.run_speed
        } else {
            tuning.base_speed
        };
        let vx = if input.move_left.active {
            -speed
        } else if input.move_right.active {
            speed
        } else {
            0.0
        };
        let vy = if input.move_up.active {
            -speed
        } else if input.move_down.active {
            speed
        } else {
            0.0
        };
        body.set_velocity(vx, vy);

        if input.jump.just_pressed && !stage.is_jumping {
            stage.is_jumping = true;
            let y = position.pos.y;
            let track = TweenTrack::new(y, y - tuning.jump_height, tuning.jump_duration)
                .with_easing(Easing::QuadOut)
                .with_yoyo(0.0);
            commands
                .entity(entity)
                .insert(TweenPositionY::new(track).with_signal(SIGNAL_JUMP_LANDED));
            debug!("Player jumped from y={:.1}", y);
        }
    }
}

/// Track the NPC in steal range and arm or disarm the steal dwell task.
pub fn proximity_system(
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
    players: Query<&MapPosition, With<Player>>,
    npcs: Query<(Entity, &MapPosition), With<Npc>>,
    mut hud: HudQuery,
) {
    let Some(player) = players.iter().next() else {
        return;
    };
    let range = stage.tuning().steal_range;
    let target = nearest_within(player, npcs.iter(), range);

    if target != stage.target_npc {
        debug!("Steal target changed: {:?} -> {:?}", stage.target_npc, target);
    }
    stage.target_npc = target;

    if stage.is_exploding {
        set_hud(&mut hud, HudText::StealPrompt, "");
    } else if target.is_some() {
        set_hud(&mut hud, HudText::StealPrompt, STEAL_PROMPT);
        if stage.steal_timer.is_none() && !stage.is_escaping {
            let dwell = stage.tuning().steal_dwell;
            stage.steal_timer =
                Some(scheduler.schedule_once(dwell, ScheduledAction::StealDwellExpired));
        }
    } else {
        set_hud(&mut hud, HudText::StealPrompt, "");
        if let Some(id) = stage.steal_timer.take() {
            scheduler.cancel(id);
        }
    }
}

/// Despawn the targeted NPC when the steal key is pressed.
pub fn steal_system(
    input: Res<InputState>,
    mut commands: Commands,
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
    mut hud: HudQuery,
) {
    if !input.steal.just_pressed || stage.is_exploding {
        return;
    }
    let Some(target) = stage.target_npc.take() else {
        return;
    };
    commands.entity(target).despawn();
    if let Some(id) = stage.steal_timer.take() {
        scheduler.cancel(id);
    }
    set_hud(&mut hud, HudText::StealPrompt, "");
    info!("Stole from NPC {:?}", target);
}

/// Reveal the escape zone once no NPC is left. Happens once per stage.
pub fn escape_unlock_system(
    mut stage: ResMut<StageState>,
    npcs: Query<(), With<Npc>>,
    mut zones: Query<&mut Opacity, With<EscapeZone>>,
    mut hud: HudQuery,
) {
    if stage.escape_enabled || !npcs.is_empty() {
        return;
    }
    let Some(mut opacity) = zones.iter_mut().next() else {
        return;
    };
    if !opacity.is_hidden() {
        return;
    }
    opacity.0 = 1.0;
    stage.escape_enabled = true;
    set_hud(&mut hud, HudText::Message, ESCAPE_UNLOCKED);
    info!("All NPCs robbed, escape zone unlocked");
}

/// Start the escape sequence when the player touches the unlocked zone.
pub fn escape_zone_observer(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
    players: Query<(), With<Player>>,
    zones: Query<&Opacity, With<EscapeZone>>,
    mut hud: HudQuery,
) {
    let event = trigger.event();
    let zone = if players.contains(event.a) && zones.contains(event.b) {
        event.b
    } else if players.contains(event.b) && zones.contains(event.a) {
        event.a
    } else {
        return;
    };
    let Ok(opacity) = zones.get(zone) else {
        return;
    };
    if !opacity.is_opaque() || !stage.escape_enabled || stage.is_escaping || stage.is_exploding {
        return;
    }

    stage.is_escaping = true;
    stage.stop_tasks(&mut scheduler);
    set_hud(&mut hud, HudText::Message, STAGE_COMPLETE);

    commands.entity(zone).insert(
        TweenOpacity::new(TweenTrack::new(opacity.0, 0.0, ESCAPE_FADE_SECS))
            .with_signal(SIGNAL_ESCAPE_FADED),
    );
    if let Some(message) = hud_entity(&hud, HudText::Message) {
        commands
            .entity(message)
            .insert(TweenOpacity::new(TweenTrack::new(1.0, 0.0, ESCAPE_FADE_SECS)));
    }
    info!("Stage {} complete, escaping", stage.stage_number);
}

/// Start the explosion sequence unless one is already running.
fn explode(
    commands: &mut Commands,
    stage: &mut StageState,
    scheduler: &mut Scheduler,
    players: &mut Query<(Entity, &mut RigidBody), With<Player>>,
    overlays: &Query<Entity, With<DamageOverlay>>,
    hud: &mut HudQuery,
) {
    if !stage.can_explode() {
        return;
    }
    stage.is_exploding = true;
    set_hud(hud, HudText::Message, EXPLODED);
    stage.stop_tasks(scheduler);

    for (entity, mut body) in players.iter_mut() {
        body.freeze();
        commands
            .entity(entity)
            .insert(TweenOpacity::new(TweenTrack::new(1.0, 0.0, PLAYER_FADE_SECS)));
    }
    for overlay in overlays.iter() {
        let flash = TweenTrack::new(0.0, FLASH_PEAK, FLASH_SECS).with_yoyo(FLASH_HOLD_SECS);
        commands
            .entity(overlay)
            .insert(TweenOpacity::new(flash).with_signal(SIGNAL_FLASH_DONE));
    }
    warn!(
        "Player exploded on stage {} with {}s left",
        stage.stage_number, stage.remaining_time
    );
}

/// Dispatch scheduler tasks that came due.
pub fn scheduled_action_observer(
    trigger: On<ScheduledEvent>,
    mut commands: Commands,
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
    mut players: Query<(Entity, &mut RigidBody), With<Player>>,
    overlays: Query<Entity, With<DamageOverlay>>,
    mut hud: HudQuery,
) {
    let ScheduledEvent { task, action } = *trigger.event();
    match action {
        ScheduledAction::CountdownTick => {
            let expired = stage.tick_countdown();
            let text = stage.countdown_text();
            set_hud(&mut hud, HudText::Countdown, &text);
            if expired {
                info!("Time is up");
                explode(
                    &mut commands,
                    &mut stage,
                    &mut scheduler,
                    &mut players,
                    &overlays,
                    &mut hud,
                );
            }
        }
        ScheduledAction::StealDwellExpired => {
            if stage.steal_timer != Some(task) {
                return;
            }
            stage.steal_timer = None;
            info!("Stayed next to an NPC without stealing");
            explode(
                &mut commands,
                &mut stage,
                &mut scheduler,
                &mut players,
                &overlays,
                &mut hud,
            );
        }
        ScheduledAction::RestartStage(outcome) => {
            commands.trigger(StageRestartEvent { outcome });
        }
    }
}

/// Continue the jump, escape and explosion sequences when their tweens end.
pub fn tween_finished_observer(
    trigger: On<TweenFinishedEvent>,
    mut commands: Commands,
    mut stage: ResMut<StageState>,
    mut scheduler: ResMut<Scheduler>,
) {
    let event = trigger.event();
    match event.signal.as_str() {
        SIGNAL_JUMP_LANDED => {
            stage.is_jumping = false;
        }
        SIGNAL_ESCAPE_FADED => {
            commands.entity(event.entity).try_despawn();
            schedule_restart(&mut scheduler, StageOutcome::Escaped);
        }
        SIGNAL_FLASH_DONE => {
            schedule_restart(&mut scheduler, StageOutcome::Failed);
        }
        _ => {}
    }
}

fn schedule_restart(scheduler: &mut Scheduler, outcome: StageOutcome) -> TaskId {
    debug!("Restart with {:?} in {}s", outcome, RESTART_DELAY_SECS);
    scheduler.schedule_once(RESTART_DELAY_SECS, ScheduledAction::RestartStage(outcome))
}

/// Alternate an NPC between walking in a random direction and standing still.
pub fn npc_roam_observer(
    trigger: On<TimerEvent>,
    mut npcs: Query<(&mut Npc, &mut RigidBody)>,
    mut rng: ResMut<GameRng>,
) {
    let event = trigger.event();
    if event.signal != SIGNAL_NPC_ROAM {
        return;
    }
    let Ok((mut npc, mut body)) = npcs.get_mut(event.entity) else {
        return;
    };
    match npc.roam {
        Roam::Moving => {
            npc.roam = Roam::Paused;
            body.stop();
        }
        Roam::Paused => {
            npc.roam = Roam::Moving;
            let (vx, vy) = random_roam_velocity(&mut rng);
            body.set_velocity(vx, vy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_within_picks_closest() {
        let mut world = World::new();
        let far = world.spawn_empty().id();
        let near = world.spawn_empty().id();
        let player = MapPosition::new(100.0, 100.0);
        let far_pos = MapPosition::new(140.0, 100.0);
        let near_pos = MapPosition::new(110.0, 100.0);
        let got = nearest_within(&player, [(far, &far_pos), (near, &near_pos)], 50.0);
        assert_eq!(got, Some(near));
    }

    #[test]
    fn test_nearest_within_range_is_exclusive() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let player = MapPosition::new(0.0, 0.0);
        let at_edge = MapPosition::new(50.0, 0.0);
        assert_eq!(nearest_within(&player, [(e, &at_edge)], 50.0), None);
    }

    #[test]
    fn test_nearest_within_tie_keeps_first() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let player = MapPosition::new(0.0, 0.0);
        let left = MapPosition::new(-10.0, 0.0);
        let right = MapPosition::new(10.0, 0.0);
        let got = nearest_within(&player, [(first, &left), (second, &right)], 50.0);
        assert_eq!(got, Some(first));
    }

    #[test]
    fn test_roam_velocity_in_range() {
        let mut rng = GameRng::with_seed(3);
        for _ in 0..64 {
            let (vx, vy) = random_roam_velocity(&mut rng);
            assert!((-NPC_ROAM_SPEED..=NPC_ROAM_SPEED).contains(&vx));
            assert!((-NPC_ROAM_SPEED..=NPC_ROAM_SPEED).contains(&vy));
        }
    }
}
