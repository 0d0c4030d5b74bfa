// Fixed-rate run loop feeding hand input into the engine.

use saber_model::HandFrame;
use saber_replay::{RunRecord, TrackingLog};
use saber_rule::{AutoPlayer, ClockSample, Engine};

/// Where each tick's hand snapshot comes from.
#[derive(Debug, Clone)]
pub enum HandInput {
    Tracking(TrackingLog),
    Autoplay(AutoPlayer),
}

impl HandInput {
    fn frame(&self, engine: &Engine, t: f32) -> HandFrame {
        match self {
            Self::Tracking(log) => log.frame_at(t),
            Self::Autoplay(auto) => auto.frame(engine, t),
        }
    }
}

/// Output of [`run`].
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub record: RunRecord,
    /// Hand snapshots fed to the engine, one per tick
    pub tracking: TrackingLog,
    pub ticks: u64,
}

/// Play one full run at `tick_rate` Hz.
///
/// The song end signal is raised one tick after the last note's miss
/// deadline, so every note is resolved before the run can be won.
pub fn run(engine: &mut Engine, input: &HandInput, tick_rate: u32) -> SessionOutput {
    let interval = 1.0 / tick_rate.max(1) as f64;
    let song_end = f64::from(engine.song_end()) + interval;

    let mut record = RunRecord::new(engine.chart().title());
    let mut tracking = TrackingLog::new();
    let mut ticks = 0u64;

    engine.start();
    while engine.phase().is_running() {
        let time = ticks as f64 * interval;
        let t = time as f32;
        let hands = input.frame(engine, t);
        tracking.record(t, &hands);

        let report = engine.update(
            ClockSample {
                time: t,
                ended: time >= song_end,
            },
            hands,
        );
        for event in &report.events {
            record.push(event, t);
        }
        ticks += 1;
    }

    record.result = engine.result();
    log::info!(
        "{} ticks, score {}, {:?}",
        ticks,
        record.result.score,
        record.result.outcome
    );
    SessionOutput {
        record,
        tracking,
        ticks,
    }
}
