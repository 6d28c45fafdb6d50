//! Stage state resource.
//!
//! Holds everything that outlives a single frame but not a single level:
//! how many NPCs the stage spawns, the countdown value, the NPC currently in
//! steal range, the escape/jump/explode flags and the ids of the scheduled
//! tasks the stage owns.
//!
//! The lifecycle is explicit: [`StageState::begin_stage`] is called when a
//! stage is (re)built and [`StageState::apply_outcome`] moves the counters
//! to the next stage or back to the first one.

use bevy_ecs::prelude::*;

use crate::resources::gameconfig::StageTuning;
use crate::resources::scheduler::{Scheduler, TaskId};

/// How a stage ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The player exploded or ran out of time. Progress is lost.
    Failed,
    /// The player reached the escape zone. Next stage is harder.
    Escaped,
}

/// Singleton state of the running stage.
#[derive(Resource, Debug, Clone)]
pub struct StageState {
    /// NPCs spawned by the current stage.
    pub npc_count: u32,
    /// Whole seconds left on the countdown.
    pub remaining_time: i32,
    /// NPC currently within steal range.
    pub target_npc: Option<Entity>,
    /// True once every NPC of the stage has been stolen from.
    pub escape_enabled: bool,
    /// True from the escape trigger until the next stage starts.
    pub is_escaping: bool,
    /// True while the jump tween runs.
    pub is_jumping: bool,
    /// True from the fail trigger until the stage restarts.
    pub is_exploding: bool,
    /// Armed steal dwell task, if any.
    pub steal_timer: Option<TaskId>,
    /// Repeating countdown task.
    pub countdown: Option<TaskId>,
    /// 1-based stage counter shown on the HUD.
    pub stage_number: u32,
    tuning: StageTuning,
}

impl Default for StageState {
    fn default() -> Self {
        Self::new(StageTuning::default())
    }
}

impl StageState {
    pub fn new(tuning: StageTuning) -> Self {
        Self {
            npc_count: tuning.initial_npcs,
            remaining_time: tuning.stage_seconds,
            target_npc: None,
            escape_enabled: false,
            is_escaping: false,
            is_jumping: false,
            is_exploding: false,
            steal_timer: None,
            countdown: None,
            stage_number: 1,
            tuning,
        }
    }

    pub fn tuning(&self) -> &StageTuning {
        &self.tuning
    }

    /// Replace the tuning, e.g. after a config reload. Counters are kept.
    pub fn set_tuning(&mut self, tuning: StageTuning) {
        self.tuning = tuning;
    }

    /// Reset the per-stage fields. `npc_count` and `stage_number` are kept.
    pub fn begin_stage(&mut self) {
        self.remaining_time = self.tuning.stage_seconds;
        self.target_npc = None;
        self.escape_enabled = false;
        self.is_escaping = false;
        self.is_jumping = false;
        self.is_exploding = false;
        self.steal_timer = None;
        self.countdown = None;
    }

    /// Move the counters according to how the previous stage ended.
    pub fn apply_outcome(&mut self, outcome: StageOutcome) {
        match outcome {
            StageOutcome::Failed => {
                self.npc_count = self.tuning.initial_npcs;
                self.stage_number = 1;
            }
            StageOutcome::Escaped => {
                self.is_escaping = false;
                self.npc_count += self.tuning.npc_increment;
                self.stage_number += 1;
            }
        }
        self.remaining_time = self.tuning.stage_seconds;
    }

    /// One countdown second elapsed.
    ///
    /// Returns true when time ran out and the fail sequence should start.
    /// Nothing happens while escaping or exploding.
    pub fn tick_countdown(&mut self) -> bool {
        if self.is_escaping || self.is_exploding {
            return false;
        }
        self.remaining_time -= 1;
        self.remaining_time <= 0
    }

    /// Cancel the countdown and the armed steal dwell, if any.
    pub fn stop_tasks(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.countdown.take() {
            scheduler.cancel(id);
        }
        if let Some(id) = self.steal_timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Text of the countdown HUD line.
    pub fn countdown_text(&self) -> String {
        format!("Time: {}", self.remaining_time)
    }

    /// Whether a new fail sequence may start.
    pub fn can_explode(&self) -> bool {
        !self.is_exploding && !self.is_escaping
    }
}
