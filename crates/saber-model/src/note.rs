use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of horizontal note slots on the track.
pub const LANE_COUNT: u8 = 4;

/// Number of vertical note slots on the track.
pub const LAYER_COUNT: u8 = 3;

/// The hand a note is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Direction a note must be cut in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutDirection {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Any,
}

impl CutDirection {
    /// Unit vector of the required swing, `None` for `Any`.
    pub fn unit_vector(self) -> Option<Vec3> {
        match self {
            Self::Up => Some(Vec3::Y),
            Self::Down => Some(Vec3::NEG_Y),
            Self::Left => Some(Vec3::NEG_X),
            Self::Right => Some(Vec3::X),
            Self::Any => None,
        }
    }
}

/// A single note in the chart.
///
/// Immutable once the chart is built; per-run state lives in the rule crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier within the chart
    pub id: String,
    /// Scheduled arrival time at the player in seconds
    pub time: f32,
    /// Horizontal slot (0..LANE_COUNT)
    pub lane: u8,
    /// Vertical slot (0..LAYER_COUNT)
    pub layer: u8,
    /// Hand expected to cut the note
    pub hand: Hand,
    /// Required cut direction
    pub direction: CutDirection,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        time: f32,
        lane: u8,
        layer: u8,
        hand: Hand,
        direction: CutDirection,
    ) -> Self {
        Self {
            id: id.into(),
            time,
            lane,
            layer,
            hand,
            direction,
        }
    }

    pub fn is_in_bounds(&self) -> bool {
        self.lane < LANE_COUNT && self.layer < LAYER_COUNT
    }
}
