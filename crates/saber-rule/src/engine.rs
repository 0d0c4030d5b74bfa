//! Per-tick engine for one run.
//!
//! Drives clock sample + hand snapshot → spawn → judge → resolve → score.
//! Everything inside a tick sees the same `HandFrame`, which is copied in by
//! value, so input arriving mid-tick can never leak into the judgement.

use std::sync::Arc;

use glam::Vec3;
use saber_model::{Chart, HandFrame};

use crate::judge::Judge;
use crate::judge_property::JudgeProperty;
use crate::motion;
use crate::note_arena::{NoteArena, NoteEvent, NoteState};
use crate::play_result::PlayResult;
use crate::score_state::{RunOutcome, RunPhase, RunSnapshot, ScoreState};
use crate::scoring_rule::ScoringRule;
use crate::spawner::Spawner;
use crate::track::TrackGeometry;

/// Rule configuration for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub track: TrackGeometry,
    pub judge: JudgeProperty,
    pub scoring: ScoringRule,
}

/// Song clock reading for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    /// Song time in seconds
    pub time: f32,
    /// The song has finished playing
    pub ended: bool,
}

impl ClockSample {
    pub fn at(time: f32) -> Self {
        Self { time, ended: false }
    }

    pub fn ended(time: f32) -> Self {
        Self { time, ended: true }
    }
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Resolutions in the order they were applied
    pub events: Vec<NoteEvent>,
    /// Chart indices spawned this tick
    pub spawned: Vec<usize>,
    /// Run counters after the tick
    pub snapshot: RunSnapshot,
    /// Set when the run ended during this tick
    pub transition: Option<RunOutcome>,
}

/// Render view of one note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView<'a> {
    pub index: usize,
    pub id: &'a str,
    pub state: NoteState,
    /// World position, only for active notes
    pub position: Option<Vec3>,
}

/// Note scheduling and hit-judgement engine.
#[derive(Debug, Clone)]
pub struct Engine {
    chart: Arc<Chart>,
    judge: Judge,
    spawner: Spawner,
    arena: NoteArena,
    score: ScoreState,
}

impl Engine {
    pub fn new(chart: Arc<Chart>, rules: RuleSet) -> Self {
        let RuleSet {
            track,
            judge,
            scoring,
        } = rules;
        let spawner = Spawner::new(&track);
        let arena = NoteArena::new(&chart);
        Self {
            chart,
            judge: Judge::new(track, judge),
            spawner,
            arena,
            score: ScoreState::new(scoring),
        }
    }

    /// Begin a new run from the top of the chart.
    pub fn start(&mut self) {
        self.arena.reset();
        self.spawner.reset();
        self.score.start();
        log::info!(
            "run started: {:?} ({} notes)",
            self.chart.title(),
            self.chart.len()
        );
    }

    /// Advance the run by one tick.
    pub fn update(&mut self, clock: ClockSample, hands: HandFrame) -> TickReport {
        let mut report = TickReport {
            events: Vec::new(),
            spawned: Vec::new(),
            snapshot: self.score.snapshot(),
            transition: None,
        };
        if !self.score.phase().is_running() {
            return report;
        }
        let t = clock.time;

        // Phase 1: spawn
        report.spawned = self.spawner.spawn_due(t, &self.chart, &mut self.arena);

        // Phase 2: judge and resolve against the tick's snapshot
        self.phase_judge(t, &hands, &mut report.events);

        // Phase 3: drop resolved notes, settle deferred defeat
        self.arena.compact();
        report.transition = self.score.finish_tick();

        // Phase 4: song end
        if report.transition.is_none() && clock.ended {
            report.transition = self.score.end(true);
        }

        if let Some(outcome) = report.transition {
            self.abort();
            log::info!("run ended at {t:.3}s: {outcome:?}");
        }
        report.snapshot = self.score.snapshot();
        report
    }

    fn phase_judge(&mut self, t: f32, hands: &HandFrame, events: &mut Vec<NoteEvent>) {
        let notes = self.chart.notes();
        for slot in 0..self.arena.live().len() {
            let index = self.arena.live()[slot];
            let verdict = self.judge.judge(&notes[index], t, hands);
            let Some(event) = self.arena.resolve(index, verdict, t) else {
                continue;
            };
            log::debug!("{:?} at {t:.3}s: {verdict:?}", event.id());
            self.score.apply(&event);
            events.push(event);
        }
    }

    /// Force the end of the run. Returns the outcome if the run was running.
    pub fn end(&mut self, victory: bool) -> Option<RunOutcome> {
        let outcome = self.score.end(victory)?;
        self.abort();
        log::info!("run ended by request: {outcome:?}");
        Some(outcome)
    }

    fn abort(&mut self) {
        self.arena.abort();
        self.spawner.abort(&self.chart);
    }

    /// Active notes with their world positions at time `t`, spawn order.
    pub fn active_views(&self, t: f32) -> impl Iterator<Item = NoteView<'_>> + '_ {
        self.arena.active().map(move |index| self.view(index, t))
    }

    /// Every note of the chart, in chart order.
    pub fn note_views(&self, t: f32) -> impl Iterator<Item = NoteView<'_>> + '_ {
        (0..self.chart.len()).map(move |index| self.view(index, t))
    }

    fn view(&self, index: usize, t: f32) -> NoteView<'_> {
        let note = &self.chart.notes()[index];
        let state = self.arena.state(index).unwrap_or_default();
        // Active notes left behind by an abort are no longer live
        let live = state.is_active() && self.score.phase().is_running();
        NoteView {
            index,
            id: &note.id,
            state,
            position: live.then(|| motion::position(self.judge.track(), note, t)),
        }
    }

    pub fn chart(&self) -> &Arc<Chart> {
        &self.chart
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    pub fn arena(&self) -> &NoteArena {
        &self.arena
    }

    pub fn state_of(&self, id: &str) -> Option<NoteState> {
        self.arena.state(self.chart.index_of(id)?)
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn phase(&self) -> RunPhase {
        self.score.phase()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.score.snapshot()
    }

    pub fn result(&self) -> PlayResult {
        self.score.result(self.chart.len())
    }

    /// Song time after which every note is resolved: last arrival plus the
    /// time a note needs to cross the miss threshold.
    pub fn song_end(&self) -> f32 {
        let track = self.judge.track();
        let miss_time = self.judge.property().miss_distance / track.note_speed;
        self.chart.duration() + miss_time
    }
}
