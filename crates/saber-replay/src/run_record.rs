// RunRecord: result and judgement timeline of a finished run.

use std::path::Path;

use anyhow::Result;
use saber_rule::{NoteEvent, PlayResult};
use serde::{Deserialize, Serialize};

use crate::json_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Judgement {
    Good,
    Bad,
    Miss,
}

/// One resolution, stamped with the tick time it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedEvent {
    pub time: f32,
    pub note_index: usize,
    pub id: String,
    pub judgement: Judgement,
}

impl RecordedEvent {
    /// Record `event`; misses carry no time of their own, so `tick_time` is used.
    pub fn new(event: &NoteEvent, tick_time: f32) -> Self {
        let (time, judgement) = match event {
            NoteEvent::Hit { good: true, time, .. } => (*time, Judgement::Good),
            NoteEvent::Hit { time, .. } => (*time, Judgement::Bad),
            NoteEvent::Miss { .. } => (tick_time, Judgement::Miss),
        };
        Self {
            time,
            note_index: event.note_index(),
            id: event.id().to_string(),
            judgement,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    #[serde(default)]
    pub chart_title: String,
    #[serde(default)]
    pub result: PlayResult,
    #[serde(default)]
    pub events: Vec<RecordedEvent>,
}

impl RunRecord {
    pub fn new(chart_title: impl Into<String>) -> Self {
        Self {
            chart_title: chart_title.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, event: &NoteEvent, tick_time: f32) {
        self.events.push(RecordedEvent::new(event, tick_time));
    }

    pub fn count(&self, judgement: Judgement) -> usize {
        self.events
            .iter()
            .filter(|e| e.judgement == judgement)
            .count()
    }

    pub fn read(path: &Path) -> Result<Self> {
        json_file::read(path)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        json_file::write(self, path)
    }
}
