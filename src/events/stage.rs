//! Stage restart event and observer.
//!
//! Triggering [`StageRestartEvent`] tears the running stage down and builds
//! it again:
//!
//! 1. every entity without [`Persistent`] is despawned (NPCs, player, zone,
//!    HUD, overlay, together with their timers and tweens)
//! 2. all scheduled tasks are dropped
//! 3. the outcome is applied to [`StageState`]
//! 4. the `"spawn_stage"` hook from [`SystemsStore`] runs

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::persistent::Persistent;
use crate::resources::scheduler::Scheduler;
use crate::resources::stage::{StageOutcome, StageState};
use crate::resources::systemsstore::SystemsStore;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRestartEvent {
    pub outcome: StageOutcome,
}

pub fn stage_restart_observer(
    trigger: On<StageRestartEvent>,
    mut commands: Commands,
    stage_entities: Query<Entity, Without<Persistent>>,
    mut scheduler: ResMut<Scheduler>,
    mut stage: ResMut<StageState>,
    systems_store: Res<SystemsStore>,
) {
    let outcome = trigger.event().outcome;

    let mut despawned = 0usize;
    for entity in stage_entities.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    scheduler.clear();
    stage.apply_outcome(outcome);

    info!(
        "Stage restart after {:?}: despawned {} entities, next stage {} with {} NPCs",
        outcome, despawned, stage.stage_number, stage.npc_count
    );

    match systems_store.get("spawn_stage") {
        Some(id) => commands.run_system(*id),
        None => error!("spawn_stage system not found in SystemsStore"),
    }
}
