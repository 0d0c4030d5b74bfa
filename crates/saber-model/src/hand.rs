use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::note::Hand;

/// One hand's tracking sample for a single tick.
///
/// `position == None` means the tracker lost the hand this tick. Velocity is
/// the zero vector when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandSample {
    #[serde(default)]
    pub position: Option<Vec3>,
    #[serde(default)]
    pub velocity: Vec3,
}

impl HandSample {
    pub const UNTRACKED: Self = Self {
        position: None,
        velocity: Vec3::ZERO,
    };

    pub fn tracked(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position: Some(position),
            velocity,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.position.is_some()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Snapshot of both hands, taken once at the start of a tick.
///
/// Passed to the engine by value, so a tick never sees a half-updated
/// position/velocity pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandFrame {
    #[serde(default)]
    pub left: HandSample,
    #[serde(default)]
    pub right: HandSample,
}

impl HandFrame {
    pub const UNTRACKED: Self = Self {
        left: HandSample::UNTRACKED,
        right: HandSample::UNTRACKED,
    };

    pub fn sample(&self, hand: Hand) -> &HandSample {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    pub fn sample_mut(&mut self, hand: Hand) -> &mut HandSample {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_untracked() {
        let frame = HandFrame::default();
        assert_eq!(frame, HandFrame::UNTRACKED);
        assert!(!frame.sample(Hand::Left).is_tracked());
        assert_eq!(frame.sample(Hand::Right).speed(), 0.0);
    }

    #[test]
    fn sample_selects_hand() {
        let mut frame = HandFrame::UNTRACKED;
        *frame.sample_mut(Hand::Right) = HandSample::tracked(Vec3::ONE, Vec3::new(3.0, 4.0, 0.0));
        assert!(frame.sample(Hand::Right).is_tracked());
        assert!(!frame.sample(Hand::Left).is_tracked());
        assert!((frame.right.speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn deserializes_missing_fields_as_untracked() {
        let frame: HandFrame =
            serde_json::from_str(r#"{"left":{"position":[0.0,1.0,0.0]}}"#).unwrap();
        assert_eq!(frame.left.position, Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(frame.left.velocity, Vec3::ZERO);
        assert!(!frame.right.is_tracked());
    }
}
