// Recorded hand tracking, replayed as per-tick hand snapshots.

use std::path::Path;

use anyhow::Result;
use glam::Vec3;
use saber_model::{HandFrame, HandSample};
use serde::{Deserialize, Serialize};

use crate::json_file;

/// One tracked hand in a recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedHand {
    pub position: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
}

impl TrackedHand {
    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Hand state at one instant. A missing hand is untracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandFrameLog {
    /// Song time in seconds
    pub time: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<TrackedHand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<TrackedHand>,
}

impl HandFrameLog {
    pub fn new(time: f32, frame: &HandFrame) -> Self {
        let tracked = |sample: &HandSample| {
            sample.position.map(|position| TrackedHand {
                position,
                velocity: sample.velocity,
            })
        };
        Self {
            time,
            left: tracked(&frame.left),
            right: tracked(&frame.right),
        }
    }

    pub fn to_frame(&self) -> HandFrame {
        let sample = |hand: Option<TrackedHand>| {
            hand.map_or(HandSample::UNTRACKED, |h| {
                HandSample::tracked(h.position, h.velocity)
            })
        };
        HandFrame {
            left: sample(self.left),
            right: sample(self.right),
        }
    }

    /// Returns `true` if the entry is usable.
    pub fn validate(&self) -> bool {
        self.time.is_finite()
            && self.time >= 0.0
            && self.left.is_none_or(|h| h.is_finite())
            && self.right.is_none_or(|h| h.is_finite())
    }
}

/// Time-ordered hand tracking log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingLog {
    #[serde(default)]
    pub frames: Vec<HandFrameLog>,
}

impl TrackingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the frame used at `time`.
    pub fn record(&mut self, time: f32, frame: &HandFrame) {
        self.frames.push(HandFrameLog::new(time, frame));
    }

    /// Drop invalid frames and sort by time (stable).
    ///
    /// Returns `true` if any frame is left.
    pub fn validate(&mut self) -> bool {
        let before = self.frames.len();
        self.frames.retain(HandFrameLog::validate);
        let dropped = before - self.frames.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} invalid tracking frames");
        }
        self.frames.sort_by(|a, b| a.time.total_cmp(&b.time));
        !self.frames.is_empty()
    }

    /// Hand snapshot at song time `t`: the latest frame at or before `t`.
    ///
    /// Both hands are untracked before the first frame.
    pub fn frame_at(&self, t: f32) -> HandFrame {
        let end = self.frames.partition_point(|f| f.time <= t);
        match end.checked_sub(1) {
            Some(i) => self.frames[i].to_frame(),
            None => HandFrame::UNTRACKED,
        }
    }

    /// Time of the last frame, 0 when empty.
    pub fn duration(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut log: TrackingLog = json_file::read(path)?;
        log.validate();
        Ok(log)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        json_file::write(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(time: f32, left_x: Option<f32>) -> HandFrameLog {
        HandFrameLog {
            time,
            left: left_x.map(|x| TrackedHand {
                position: Vec3::new(x, 1.0, 0.0),
                velocity: Vec3::Y,
            }),
            right: None,
        }
    }

    #[test]
    fn test_frame_at_uses_latest_frame() {
        let log = TrackingLog {
            frames: vec![frame(1.0, Some(0.1)), frame(2.0, Some(0.2)), frame(3.0, None)],
        };
        assert_eq!(log.frame_at(0.5), HandFrame::UNTRACKED);
        assert_eq!(log.frame_at(1.0).left.position, Some(Vec3::new(0.1, 1.0, 0.0)));
        assert_eq!(log.frame_at(1.99).left.position, Some(Vec3::new(0.1, 1.0, 0.0)));
        assert_eq!(log.frame_at(2.5).left.velocity, Vec3::Y);
        assert!(!log.frame_at(10.0).left.is_tracked());
        assert!(!log.frame_at(1.5).right.is_tracked());
    }

    #[test]
    fn test_validate_drops_and_sorts() {
        let mut log = TrackingLog {
            frames: vec![
                frame(2.0, Some(0.2)),
                frame(-1.0, Some(0.0)),
                frame(f32::NAN, None),
                frame(1.0, Some(f32::INFINITY)),
                frame(1.0, Some(0.1)),
                frame(1.0, None),
            ],
        };
        assert!(log.validate());
        let times: Vec<f32> = log.frames.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![1.0, 1.0, 2.0]);
        // stable: equal times keep file order
        assert!(log.frames[0].left.is_some());
        assert!(log.frames[1].left.is_none());
        assert_eq!(log.duration(), 2.0);
    }

    #[test]
    fn test_validate_empty() {
        let mut log = TrackingLog {
            frames: vec![frame(-3.0, None)],
        };
        assert!(!log.validate());
    }

    #[test]
    fn test_record_then_replay() {
        let mut log = TrackingLog::new();
        let live = HandFrame {
            left: HandSample::UNTRACKED,
            right: HandSample::tracked(Vec3::new(0.5, 1.2, 0.0), Vec3::new(0.0, -3.0, 0.0)),
        };
        log.record(0.25, &live);
        assert_eq!(log.frame_at(0.25), live);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"frames": [
            {"time": 0.5, "left": {"position": [0.0, 1.0, 0.0], "velocity": [0.0, -2.0, 0.0]}},
            {"time": 0.6, "right": {"position": [0.3, 1.0, 0.1]}}
        ]}"#;
        let log: TrackingLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.frames.len(), 2);
        assert_eq!(log.frames[1].right.unwrap().velocity, Vec3::ZERO);
        assert!(log.frame_at(0.55).left.is_tracked());
    }

    #[test]
    fn test_read_write_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracking.json.gz");
        let log = TrackingLog {
            frames: vec![frame(0.0, Some(0.0)), frame(0.1, None)],
        };
        log.write(&path).unwrap();
        assert_eq!(TrackingLog::read(&path).unwrap(), log);
    }
}
