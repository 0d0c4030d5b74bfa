// Note scheduling, motion, hit judgement, note lifecycle and run scoring

mod autoplay;
pub mod engine;
mod judge;
mod judge_property;
mod motion;
mod note_arena;
mod play_result;
mod score_state;
mod scoring_rule;
mod spawner;
mod track;

pub use autoplay::AutoPlayer;
pub use engine::{ClockSample, Engine, NoteView, RuleSet, TickReport};
pub use judge::{Judge, PendingReason, Verdict};
pub use judge_property::JudgeProperty;
pub use motion::{position, track_position};
pub use note_arena::{NoteArena, NoteEvent, NoteState, StateCounts};
pub use play_result::PlayResult;
pub use score_state::{RunOutcome, RunPhase, RunSnapshot, ScoreState};
pub use scoring_rule::{MultiplierStep, ScoringRule};
pub use spawner::Spawner;
pub use track::TrackGeometry;
