use glam::Vec3;
use saber_model::{Hand, HandFrame, HandSample};

use crate::engine::Engine;
use crate::motion;

/// Synthesizes perfect hand input for a running engine.
///
/// Each hand targets the earliest active note assigned to it that is inside
/// the near-field window and swings through it in the required direction.
/// Hands without a target are reported untracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPlayer {
    /// Swing speed in units per second
    pub cut_speed: f32,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self { cut_speed: 4.0 }
    }
}

impl AutoPlayer {
    pub fn new(cut_speed: f32) -> Self {
        Self { cut_speed }
    }

    pub fn frame(&self, engine: &Engine, t: f32) -> HandFrame {
        let mut frame = HandFrame::UNTRACKED;
        for hand in Hand::ALL {
            *frame.sample_mut(hand) = self.sample_for(engine, hand, t);
        }
        frame
    }

    fn sample_for(&self, engine: &Engine, hand: Hand, t: f32) -> HandSample {
        let track = engine.judge().track();
        let property = engine.judge().property();
        let near = track.player_distance - property.near_window_before
            ..=track.player_distance + property.near_window_after;
        let notes = engine.chart().notes();

        let target = engine.arena().active().map(|i| &notes[i]).find(|note| {
            note.hand == hand && near.contains(&motion::track_position(track, note, t))
        });
        match target {
            Some(note) => {
                let direction = note.direction.unit_vector().unwrap_or(Vec3::NEG_Z);
                HandSample::tracked(
                    motion::position(track, note, t),
                    direction * self.cut_speed,
                )
            }
            None => HandSample::UNTRACKED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ClockSample, RuleSet};
    use saber_model::{Chart, CutDirection, Note};
    use std::sync::Arc;

    fn engine() -> Engine {
        let notes = vec![
            Note::new("l", 1.0, 0, 0, Hand::Left, CutDirection::Left),
            Note::new("r", 1.0, 3, 2, Hand::Right, CutDirection::Any),
            Note::new("l2", 5.0, 1, 0, Hand::Left, CutDirection::Down),
        ];
        let chart = Arc::new(Chart::new("auto", notes).unwrap());
        let mut e = Engine::new(chart, RuleSet::default());
        e.start();
        e
    }

    #[test]
    fn no_target_outside_near_window() {
        let mut e = engine();
        e.update(ClockSample::at(0.0), HandFrame::UNTRACKED);
        let frame = AutoPlayer::default().frame(&e, 0.0);
        assert!(!frame.left.is_tracked());
        assert!(!frame.right.is_tracked());
    }

    #[test]
    fn swings_through_targets() {
        let mut e = engine();
        e.update(ClockSample::at(0.0), HandFrame::UNTRACKED);
        let frame = AutoPlayer::new(5.0).frame(&e, 1.0);
        assert_eq!(frame.left.velocity, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(frame.right.velocity, Vec3::new(0.0, 0.0, -5.0));
        let right_pos = frame.right.position.unwrap();
        assert!((right_pos.x - 0.9).abs() < 1e-5);
        assert!((right_pos.y - 1.8).abs() < 1e-5);
    }

    #[test]
    fn full_autoplay_hits_everything_good() {
        let mut e = engine();
        let auto = AutoPlayer::default();
        let mut t = 0.0;
        while e.phase().is_running() {
            let frame = auto.frame(&e, t);
            let ended = t > e.song_end();
            e.update(ClockSample { time: t, ended }, frame);
            t += 1.0 / 90.0;
        }
        let result = e.result();
        assert_eq!(result.good, 3);
        assert_eq!(result.miss, 0);
        assert!(result.is_full_combo());
        assert!(result.is_clear());
    }
}
