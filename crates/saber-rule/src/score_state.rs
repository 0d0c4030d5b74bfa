//! Run scoring and health state machine.
//!
//! `Idle → Running → Ended(Victory | Defeat)`. Hit/miss events only change the
//! state while running. A miss that empties health schedules Defeat; the phase
//! change itself happens in [`ScoreState::finish_tick`] after the whole tick's
//! events were applied. Like a dead gauge, health at 0 does not recover.

use serde::{Deserialize, Serialize};

use crate::note_arena::NoteEvent;
use crate::play_result::PlayResult;
use crate::scoring_rule::ScoringRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Ended(RunOutcome),
}

impl RunPhase {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn outcome(self) -> Option<RunOutcome> {
        match self {
            Self::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Read-only view of the run counters for HUDs and end-of-run decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub score: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub health: u32,
    pub phase: RunPhase,
}

/// Authoritative run counters, mutated only through event application.
#[derive(Debug, Clone)]
pub struct ScoreState {
    rule: ScoringRule,
    phase: RunPhase,
    score: u64,
    combo: u32,
    multiplier: u32,
    health: u32,
    max_combo: u32,
    good_count: u32,
    bad_count: u32,
    miss_count: u32,
    defeat_pending: bool,
}

impl ScoreState {
    pub fn new(rule: ScoringRule) -> Self {
        let health = rule.max_health;
        Self {
            rule,
            phase: RunPhase::Idle,
            score: 0,
            combo: 0,
            multiplier: 1,
            health,
            max_combo: 0,
            good_count: 0,
            bad_count: 0,
            miss_count: 0,
            defeat_pending: false,
        }
    }

    /// Reset every counter and enter Running.
    pub fn start(&mut self) {
        let rule = std::mem::take(&mut self.rule);
        *self = Self::new(rule);
        self.phase = RunPhase::Running;
    }

    /// Apply one hit/miss event. Ignored unless running.
    pub fn apply(&mut self, event: &NoteEvent) {
        if !self.phase.is_running() {
            return;
        }
        match event {
            NoteEvent::Hit { good, .. } => {
                self.combo += 1;
                self.max_combo = self.max_combo.max(self.combo);
                self.multiplier = self.rule.multiplier(self.combo);
                self.score += u64::from(self.rule.hit_points(*good)) * u64::from(self.multiplier);
                if *good {
                    self.good_count += 1;
                } else {
                    self.bad_count += 1;
                }
                if self.health > 0 {
                    self.health = (self.health + self.rule.hit_health).min(self.rule.max_health);
                }
            }
            NoteEvent::Miss { .. } => {
                self.combo = 0;
                self.multiplier = 1;
                self.miss_count += 1;
                if self.health > 0 {
                    self.health = self.health.saturating_sub(self.rule.miss_damage);
                    if self.health == 0 {
                        self.defeat_pending = true;
                    }
                }
            }
        }
    }

    /// Apply the deferred Defeat, if one was scheduled this tick.
    pub fn finish_tick(&mut self) -> Option<RunOutcome> {
        if self.defeat_pending && self.phase.is_running() {
            self.defeat_pending = false;
            self.phase = RunPhase::Ended(RunOutcome::Defeat);
            return Some(RunOutcome::Defeat);
        }
        None
    }

    /// Force the end of a running run.
    pub fn end(&mut self, victory: bool) -> Option<RunOutcome> {
        if !self.phase.is_running() {
            return None;
        }
        let outcome = if victory {
            RunOutcome::Victory
        } else {
            RunOutcome::Defeat
        };
        self.defeat_pending = false;
        self.phase = RunPhase::Ended(outcome);
        Some(outcome)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            score: self.score,
            combo: self.combo,
            multiplier: self.multiplier,
            health: self.health,
            phase: self.phase,
        }
    }

    pub fn result(&self, total_notes: usize) -> PlayResult {
        PlayResult {
            score: self.score,
            max_combo: self.max_combo,
            good: self.good_count,
            bad: self.bad_count,
            miss: self.miss_count,
            total_notes: total_notes as u32,
            health: self.health,
            outcome: self.phase.outcome(),
        }
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn health(&self) -> u32 {
        self.health
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(ScoringRule::default())
    }
}
