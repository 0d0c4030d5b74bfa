use std::path::Path;

use anyhow::{Context, Result};
use saber_rule::{JudgeProperty, RuleSet, ScoringRule, TrackGeometry};
use serde::{Deserialize, Serialize};

/// Default engine tick rate in Hz.
pub const DEFAULT_TICK_RATE: u32 = 90;

const MAX_TICK_RATE: u32 = 1000;
const MAX_DISTANCE: f32 = 1000.0;
const MAX_WINDOW: f32 = 10.0;
const MAX_SPEED: f32 = 1000.0;
const MAX_POINTS: u32 = 1_000_000;
const MAX_HEALTH: u32 = 10_000;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Config {
    pub track: TrackGeometry,
    pub judge: JudgeProperty,
    pub scoring: ScoringRule,
    /// Engine updates per second
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            track: TrackGeometry::default(),
            judge: JudgeProperty::default(),
            scoring: ScoringRule::default(),
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

/// Clamp to `[min, max]`, replacing non-finite values with `default`.
fn clamp_finite(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

impl Config {
    pub fn validate(&mut self) {
        self.tick_rate = self.tick_rate.clamp(1, MAX_TICK_RATE);

        let d = TrackGeometry::default();
        let track = &mut self.track;
        track.spawn_distance = clamp_finite(
            track.spawn_distance,
            -MAX_DISTANCE,
            MAX_DISTANCE,
            d.spawn_distance,
        );
        track.player_distance = clamp_finite(
            track.player_distance,
            -MAX_DISTANCE,
            MAX_DISTANCE,
            d.player_distance,
        );
        track.note_speed = clamp_finite(track.note_speed, 0.1, MAX_SPEED, d.note_speed);
        track.lane_spacing = clamp_finite(track.lane_spacing, 0.0, MAX_WINDOW, d.lane_spacing);
        track.layer_base_height = clamp_finite(
            track.layer_base_height,
            -MAX_WINDOW,
            MAX_WINDOW,
            d.layer_base_height,
        );
        track.layer_spacing = clamp_finite(track.layer_spacing, 0.0, MAX_WINDOW, d.layer_spacing);

        let d = JudgeProperty::default();
        let judge = &mut self.judge;
        judge.near_window_before = clamp_finite(
            judge.near_window_before,
            0.0,
            MAX_WINDOW,
            d.near_window_before,
        );
        judge.near_window_after = clamp_finite(
            judge.near_window_after,
            0.0,
            MAX_WINDOW,
            d.near_window_after,
        );
        judge.miss_distance = clamp_finite(judge.miss_distance, 0.0, MAX_WINDOW, d.miss_distance);
        judge.proximity_radius =
            clamp_finite(judge.proximity_radius, 0.0, MAX_WINDOW, d.proximity_radius);
        judge.min_speed = clamp_finite(judge.min_speed, 0.0, MAX_SPEED, d.min_speed);
        judge.alignment_threshold = clamp_finite(
            judge.alignment_threshold,
            -1.0,
            1.0,
            d.alignment_threshold,
        );

        let scoring = &mut self.scoring;
        scoring.max_health = scoring.max_health.clamp(1, MAX_HEALTH);
        scoring.base_points = scoring.base_points.min(MAX_POINTS);
        scoring.good_bonus = scoring.good_bonus.min(MAX_POINTS);
        scoring.hit_health = scoring.hit_health.min(scoring.max_health);
        scoring.miss_damage = scoring.miss_damage.min(scoring.max_health);
        for step in &mut scoring.multiplier_steps {
            step.multiplier = step.multiplier.clamp(1, 1000);
        }
        scoring
            .multiplier_steps
            .sort_by(|a, b| b.threshold.cmp(&a.threshold));
        scoring.multiplier_steps.dedup_by_key(|step| step.threshold);
    }

    /// Read config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate();
        Ok(config)
    }

    /// Read config from `path`, falling back to defaults when the file does not exist.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("{} not found, using default config", path.display());
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    pub fn rule_set(&self) -> RuleSet {
        RuleSet {
            track: self.track.clone(),
            judge: self.judge.clone(),
            scoring: self.scoring.clone(),
        }
    }

    /// Seconds between engine ticks.
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}
