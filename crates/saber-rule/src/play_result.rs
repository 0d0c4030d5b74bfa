use serde::{Deserialize, Serialize};

use crate::score_state::RunOutcome;

/// End-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub score: u64,
    pub max_combo: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
    pub total_notes: u32,
    pub health: u32,
    /// `None` while the run has not ended
    pub outcome: Option<RunOutcome>,
}

impl PlayResult {
    pub fn hits(&self) -> u32 {
        self.good + self.bad
    }

    pub fn judged(&self) -> u32 {
        self.hits() + self.miss
    }

    /// Hits over judged notes, 0.0 when nothing was judged.
    pub fn accuracy(&self) -> f64 {
        match self.judged() {
            0 => 0.0,
            judged => f64::from(self.hits()) / f64::from(judged),
        }
    }

    /// Every note was hit, none missed.
    pub fn is_full_combo(&self) -> bool {
        self.total_notes > 0 && self.miss == 0 && self.hits() == self.total_notes
    }

    pub fn is_clear(&self) -> bool {
        self.outcome == Some(RunOutcome::Victory)
    }
}
