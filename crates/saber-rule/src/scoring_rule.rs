use serde::{Deserialize, Serialize};

/// Combo threshold for a score multiplier: applies when `combo > threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierStep {
    pub threshold: u32,
    pub multiplier: u32,
}

impl MultiplierStep {
    pub const fn new(threshold: u32, multiplier: u32) -> Self {
        Self {
            threshold,
            multiplier,
        }
    }
}

/// Points, health deltas and the combo multiplier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ScoringRule {
    /// Points for any hit before the multiplier
    pub base_points: u32,
    /// Extra points for a good cut
    pub good_bonus: u32,
    /// Health gained per hit
    pub hit_health: u32,
    /// Health lost per miss
    pub miss_damage: u32,
    /// Starting and maximum health
    pub max_health: u32,
    /// Multiplier steps, highest threshold first
    pub multiplier_steps: Vec<MultiplierStep>,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            base_points: 100,
            good_bonus: 50,
            hit_health: 2,
            miss_damage: 15,
            max_health: 100,
            multiplier_steps: vec![
                MultiplierStep::new(30, 8),
                MultiplierStep::new(20, 4),
                MultiplierStep::new(10, 2),
            ],
        }
    }
}

impl ScoringRule {
    /// Multiplier for a combo count, 1 below every step.
    pub fn multiplier(&self, combo: u32) -> u32 {
        self.multiplier_steps
            .iter()
            .find(|step| combo > step.threshold)
            .map_or(1, |step| step.multiplier)
    }

    /// Points (before the multiplier) for a hit.
    pub fn hit_points(&self, good: bool) -> u32 {
        if good {
            self.base_points + self.good_bonus
        } else {
            self.base_points
        }
    }
}
