//! End-to-end scenarios driven through the public engine API.

use std::sync::Arc;

use saber_model::{Chart, CutDirection, Hand, HandFrame, HandSample, Note, Vec3};
use saber_rule::{
    AutoPlayer, ClockSample, Engine, NoteEvent, NoteState, RuleSet, RunOutcome, RunPhase,
    position,
};

fn chart(notes: Vec<Note>) -> Arc<Chart> {
    Arc::new(Chart::new("scenario", notes).unwrap())
}

fn started(notes: Vec<Note>) -> Engine {
    let mut engine = Engine::new(chart(notes), RuleSet::default());
    engine.start();
    engine
}

/// Hand frame with `hand` sitting on note `index` at time `t`.
fn hand_on(engine: &Engine, index: usize, t: f32, velocity: Vec3) -> HandFrame {
    let note = &engine.chart().notes()[index];
    let mut frame = HandFrame::UNTRACKED;
    *frame.sample_mut(note.hand) =
        HandSample::tracked(position(engine.judge().track(), note, t), velocity);
    frame
}

#[test]
fn good_hit_on_any_note() {
    let mut engine = started(vec![Note::new(
        "a",
        2.0,
        1,
        0,
        Hand::Left,
        CutDirection::Any,
    )]);
    engine.update(ClockSample::at(0.0), HandFrame::UNTRACKED);

    let frame = hand_on(&engine, 0, 2.0, Vec3::new(0.0, 0.0, -2.0));
    let report = engine.update(ClockSample::at(2.0), frame);

    assert_eq!(
        report.events,
        vec![NoteEvent::Hit {
            note_index: 0,
            id: "a".to_string(),
            good: true,
            time: 2.0,
        }]
    );
    assert_eq!(report.snapshot.score, 150);
    assert_eq!(report.snapshot.combo, 1);
    assert_eq!(report.snapshot.multiplier, 1);
    assert_eq!(report.snapshot.health, 100);
}

#[test]
fn untracked_right_hand_misses_after_deadline() {
    let mut engine = started(vec![Note::new(
        "b",
        1.0,
        2,
        1,
        Hand::Right,
        CutDirection::Down,
    )]);
    let mut t = 0.0;
    let mut events = Vec::new();
    while t < 1.5 {
        events.extend(engine.update(ClockSample::at(t), HandFrame::UNTRACKED).events);
        t += 0.01;
    }
    assert_eq!(
        events,
        vec![NoteEvent::Miss {
            note_index: 0,
            id: "b".to_string()
        }]
    );
    let snap = engine.snapshot();
    assert_eq!(snap.health, 85);
    assert_eq!(snap.combo, 0);
    assert_eq!(snap.multiplier, 1);
    assert_eq!(engine.arena().state(0), Some(NoteState::Missed));
}

#[test]
fn weakly_aligned_swing_is_bad() {
    let mut engine = started(vec![Note::new(
        "c",
        2.0,
        3,
        2,
        Hand::Right,
        CutDirection::Right,
    )]);
    engine.update(ClockSample::at(0.0), HandFrame::UNTRACKED);

    // normalized dot with +x is 0.1
    let velocity = Vec3::new(0.1, (1.0f32 - 0.01).sqrt(), 0.0) * 3.0;
    let frame = hand_on(&engine, 0, 2.0, velocity);
    let report = engine.update(ClockSample::at(2.0), frame);

    assert!(matches!(
        report.events.as_slice(),
        [NoteEvent::Hit { good: false, .. }]
    ));
    assert_eq!(report.snapshot.score, 100);
}

#[test]
fn untracked_tick_does_not_resolve_a_reachable_note() {
    let mut engine = started(vec![Note::new(
        "d",
        2.0,
        0,
        0,
        Hand::Left,
        CutDirection::Any,
    )]);
    engine.update(ClockSample::at(0.0), HandFrame::UNTRACKED);
    assert!(
        engine
            .update(ClockSample::at(2.0), HandFrame::UNTRACKED)
            .events
            .is_empty()
    );
    // tracking comes back within the window
    let frame = hand_on(&engine, 0, 2.05, Vec3::new(0.0, 4.0, 0.0));
    let report = engine.update(ClockSample::at(2.05), frame);
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.snapshot.score, 150);
}

#[test]
fn one_swing_can_cut_stacked_notes() {
    let mut engine = started(vec![
        Note::new("low", 2.0, 1, 0, Hand::Left, CutDirection::Any),
        Note::new("same", 2.0, 1, 0, Hand::Left, CutDirection::Any),
    ]);
    engine.update(ClockSample::at(0.0), HandFrame::UNTRACKED);
    let frame = hand_on(&engine, 0, 2.0, Vec3::new(0.0, -3.0, 0.0));
    let report = engine.update(ClockSample::at(2.0), frame);
    let ids: Vec<_> = report.events.iter().map(|e| e.id().to_string()).collect();
    assert_eq!(ids, vec!["low", "same"]);
    assert_eq!(report.snapshot.combo, 2);
}

#[test]
fn combo_multiplier_scoring_over_a_run() {
    let notes = (0..12)
        .map(|i| {
            Note::new(
                format!("n{i}"),
                1.0 + i as f32 * 0.5,
                (i % 4) as u8,
                0,
                if i % 2 == 0 { Hand::Left } else { Hand::Right },
                CutDirection::Any,
            )
        })
        .collect();
    let mut engine = started(notes);
    let auto = AutoPlayer::default();
    let mut t = 0.0;
    while engine.phase().is_running() {
        let frame = auto.frame(&engine, t);
        let ended = t > engine.song_end();
        engine.update(ClockSample { time: t, ended }, frame);
        t += 1.0 / 120.0;
    }
    // 10 hits at 1x, then combo 11 and 12 at 2x
    assert_eq!(engine.snapshot().score, 10 * 150 + 2 * 300);
    assert_eq!(engine.snapshot().multiplier, 2);
    assert_eq!(engine.phase(), RunPhase::Ended(RunOutcome::Victory));
    assert_eq!(engine.result().max_combo, 12);
}

#[test]
fn misses_drain_health_to_a_single_defeat() {
    let notes = (0..10)
        .map(|i| {
            Note::new(
                format!("m{i}"),
                1.0 + i as f32 * 0.2,
                0,
                0,
                Hand::Left,
                CutDirection::Any,
            )
        })
        .collect();
    let mut engine = started(notes);
    let mut transitions = Vec::new();
    let mut misses = 0;
    let mut t = 0.0;
    while t < 5.0 {
        let report = engine.update(ClockSample::at(t), HandFrame::UNTRACKED);
        misses += report.events.len();
        transitions.extend(report.transition);
        t += 0.05;
    }
    assert_eq!(transitions, vec![RunOutcome::Defeat]);
    // 100 / 15 rounds up to 7 misses
    assert_eq!(misses, 7);
    assert_eq!(engine.snapshot().health, 0);
    // the rest were never resolved
    assert_eq!(engine.arena().counts().missed, 7);
}

#[test]
fn empty_chart_ends_on_song_end() {
    let mut engine = started(Vec::new());
    assert!(
        engine
            .update(ClockSample::at(0.0), HandFrame::UNTRACKED)
            .transition
            .is_none()
    );
    let report = engine.update(ClockSample::ended(0.1), HandFrame::UNTRACKED);
    assert_eq!(report.transition, Some(RunOutcome::Victory));
    assert_eq!(engine.result().accuracy(), 0.0);
}
