use saber_model::Chart;

use crate::note_arena::NoteArena;
use crate::track::TrackGeometry;

/// Activates chart notes once they are within lead time of their arrival.
///
/// The cursor only moves forward, so every note is spawned at most once and
/// in chart (arrival time) order.
#[derive(Debug, Clone)]
pub struct Spawner {
    lead_time: f32,
    cursor: usize,
}

impl Spawner {
    pub fn new(track: &TrackGeometry) -> Self {
        Self {
            lead_time: track.lead_time(),
            cursor: 0,
        }
    }

    pub fn lead_time(&self) -> f32 {
        self.lead_time
    }

    /// Index of the next note that has not been spawned.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Activate every note with `time - lead_time <= t`.
    ///
    /// Returns the chart indices activated by this call, in order.
    pub fn spawn_due(&mut self, t: f32, chart: &Chart, arena: &mut NoteArena) -> Vec<usize> {
        let mut spawned = Vec::new();
        let notes = chart.notes();
        while let Some(note) = notes.get(self.cursor) {
            if note.time - self.lead_time > t {
                break;
            }
            if arena.activate(self.cursor) {
                spawned.push(self.cursor);
            }
            self.cursor += 1;
        }
        spawned
    }

    /// Rewind to the start of the chart for a new run.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Stop spawning for the rest of the run.
    pub fn abort(&mut self, chart: &Chart) {
        self.cursor = chart.len();
    }

    pub fn is_exhausted(&self, chart: &Chart) -> bool {
        self.cursor >= chart.len()
    }
}
