//! Hit judgement for a single note against one tick's hand snapshot.
//!
//! Policy, in order:
//! 1. past the miss threshold → `Miss`, regardless of hands
//! 2. outside the near-field window → no judgement
//! 3. assigned hand untracked → no judgement
//! 4. hand farther than the proximity radius → no judgement
//! 5. otherwise a hit, `Good` when speed (and, for directed notes, alignment)
//!    meet the thresholds, `Bad` when they do not

use saber_model::{CutDirection, HandFrame, Note};

use crate::judge_property::JudgeProperty;
use crate::motion;
use crate::track::TrackGeometry;

/// Why a note stayed active this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReason {
    /// Still in front of the near-field window
    TooFar,
    /// Behind the judge window but not yet past the miss threshold
    Passed,
    /// The assigned hand had no tracked position
    Untracked,
    /// The hand was tracked but outside the proximity radius
    OutOfReach,
}

/// Outcome of judging one note for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Bad,
    Miss,
    Pending(PendingReason),
}

impl Verdict {
    /// Whether this verdict resolves the note.
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Pending(_))
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::Good | Self::Bad)
    }
}

/// Stateless judge bound to a track geometry and judge property.
#[derive(Debug, Clone, Default)]
pub struct Judge {
    track: TrackGeometry,
    property: JudgeProperty,
}

impl Judge {
    pub fn new(track: TrackGeometry, property: JudgeProperty) -> Self {
        Self { track, property }
    }

    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    pub fn property(&self) -> &JudgeProperty {
        &self.property
    }

    /// Judge `note` at song time `t` against the tick snapshot `hands`.
    pub fn judge(&self, note: &Note, t: f32, hands: &HandFrame) -> Verdict {
        let jp = &self.property;
        let player = self.track.player_distance;
        let z = motion::track_position(&self.track, note, t);

        if z > player + jp.miss_distance {
            return Verdict::Miss;
        }
        if z < player - jp.near_window_before {
            return Verdict::Pending(PendingReason::TooFar);
        }
        if z > player + jp.near_window_after {
            return Verdict::Pending(PendingReason::Passed);
        }

        let sample = hands.sample(note.hand);
        let Some(hand_pos) = sample.position else {
            return Verdict::Pending(PendingReason::Untracked);
        };

        let note_pos = motion::position(&self.track, note, t);
        if hand_pos.distance(note_pos) > jp.proximity_radius {
            return Verdict::Pending(PendingReason::OutOfReach);
        }

        let speed = sample.speed();
        let fast_enough = speed >= jp.min_speed;
        let good = match Self::alignment(note.direction, sample.velocity) {
            None => fast_enough,
            Some(alignment) => alignment >= jp.alignment_threshold && fast_enough,
        };
        if good { Verdict::Good } else { Verdict::Bad }
    }

    /// Alignment of a swing with a required direction, `None` for [`CutDirection::Any`].
    pub fn alignment(direction: CutDirection, velocity: glam::Vec3) -> Option<f32> {
        direction
            .unit_vector()
            .map(|required| velocity.normalize_or_zero().dot(required))
    }
}
