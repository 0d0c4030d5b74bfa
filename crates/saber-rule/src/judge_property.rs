use serde::{Deserialize, Serialize};

/// Tunable judge windows and thresholds.
///
/// The window values are tied to a particular note speed; tune them together
/// with [`TrackGeometry::note_speed`](crate::TrackGeometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct JudgeProperty {
    /// Judging starts once a note is within this distance in front of the player
    pub near_window_before: f32,
    /// Judging continues up to this distance behind the player
    pub near_window_after: f32,
    /// Notes further than this behind the player are missed
    pub miss_distance: f32,
    /// Maximum hand-to-note distance for a cut
    pub proximity_radius: f32,
    /// Minimum hand speed (units/s) for a good cut
    pub min_speed: f32,
    /// Minimum dot product between swing and required direction for a good cut
    pub alignment_threshold: f32,
}

impl Default for JudgeProperty {
    fn default() -> Self {
        Self {
            near_window_before: 1.5,
            near_window_after: 1.0,
            miss_distance: 1.0,
            proximity_radius: 0.6,
            min_speed: 1.5,
            alignment_threshold: 0.3,
        }
    }
}

impl JudgeProperty {
    /// Forgiving preset: wider reach and lower swing requirements.
    pub fn easy() -> Self {
        Self {
            proximity_radius: 0.8,
            min_speed: 1.0,
            alignment_threshold: 0.0,
            ..Self::default()
        }
    }

    /// Strict preset: tighter reach and faster, better aligned swings.
    pub fn hard() -> Self {
        Self {
            proximity_radius: 0.45,
            min_speed: 2.0,
            alignment_threshold: 0.6,
            ..Self::default()
        }
    }
}
