// Legacy beat-based map decoder (`_notes` with times in beats)

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::chart::Chart;
use crate::note::{CutDirection, Hand, Note};

const TYPE_LEFT: u8 = 0;
const TYPE_RIGHT: u8 = 1;
const TYPE_BOMB: u8 = 3;

const CUT_ANY: u8 = 8;

#[derive(Debug, Deserialize)]
struct BeatmapFile {
    #[serde(rename = "_notes", default)]
    notes: Vec<BeatmapNote>,
}

#[derive(Debug, Deserialize)]
struct BeatmapNote {
    #[serde(rename = "_time")]
    beat: f32,
    #[serde(rename = "_lineIndex")]
    line_index: u8,
    #[serde(rename = "_lineLayer")]
    line_layer: u8,
    #[serde(rename = "_type")]
    note_type: u8,
    #[serde(rename = "_cutDirection")]
    cut_direction: u8,
}

/// Decoder for beat-timed maps. Times are converted with a fixed BPM.
///
/// Bombs are dropped. Diagonal cut directions (4..=7) have no counterpart in
/// [`CutDirection`] and are dropped with a warning.
pub struct BeatmapDecoder;

impl BeatmapDecoder {
    pub fn decode(path: &Path, bpm: f32) -> Result<Chart> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read beatmap {}", path.display()))?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::decode_str(&data, bpm, title)
            .with_context(|| format!("invalid beatmap {}", path.display()))
    }

    pub fn decode_str(data: &str, bpm: f32, title: impl Into<String>) -> Result<Chart> {
        if !bpm.is_finite() || bpm <= 0.0 {
            bail!("bpm must be positive, got {bpm}");
        }
        let file: BeatmapFile = serde_json::from_str(data)?;
        let seconds_per_beat = 60.0 / bpm;

        let mut notes = Vec::with_capacity(file.notes.len());
        let mut dropped = 0usize;
        for (i, raw) in file.notes.iter().enumerate() {
            let hand = match raw.note_type {
                TYPE_LEFT => Hand::Left,
                TYPE_RIGHT => Hand::Right,
                TYPE_BOMB => continue,
                other => bail!("note {i}: unknown note type {other}"),
            };
            let Some(direction) = Self::cut_direction(raw.cut_direction) else {
                dropped += 1;
                continue;
            };
            notes.push(Note {
                id: format!("b{i}"),
                time: raw.beat * seconds_per_beat,
                lane: raw.line_index,
                layer: raw.line_layer,
                hand,
                direction,
            });
        }
        if dropped > 0 {
            log::warn!("dropped {dropped} diagonal notes from beatmap");
        }

        Chart::new(title, notes)
    }

    fn cut_direction(code: u8) -> Option<CutDirection> {
        match code {
            0 => Some(CutDirection::Up),
            1 => Some(CutDirection::Down),
            2 => Some(CutDirection::Left),
            3 => Some(CutDirection::Right),
            CUT_ANY => Some(CutDirection::Any),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_beats_to_seconds() {
        let data = r#"{ "_notes": [
            { "_time": 4.0, "_lineIndex": 1, "_lineLayer": 0, "_type": 0, "_cutDirection": 8 },
            { "_time": 2.0, "_lineIndex": 2, "_lineLayer": 1, "_type": 1, "_cutDirection": 1 }
        ] }"#;
        let chart = BeatmapDecoder::decode_str(data, 120.0, "map").unwrap();
        assert_eq!(chart.len(), 2);
        // re-sorted by time: beat 2 first
        let first = chart.get(0).unwrap();
        assert_eq!(first.id, "b1");
        assert!((first.time - 1.0).abs() < 1e-6);
        assert_eq!(first.hand, Hand::Right);
        assert_eq!(first.direction, CutDirection::Down);
        let second = chart.get(1).unwrap();
        assert!((second.time - 2.0).abs() < 1e-6);
        assert_eq!(second.direction, CutDirection::Any);
    }

    #[test]
    fn drops_bombs_and_diagonals() {
        let data = r#"{ "_notes": [
            { "_time": 1.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 3, "_cutDirection": 0 },
            { "_time": 2.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 0, "_cutDirection": 5 },
            { "_time": 3.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 1, "_cutDirection": 2 }
        ] }"#;
        let chart = BeatmapDecoder::decode_str(data, 60.0, "map").unwrap();
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.get(0).unwrap().id, "b2");
    }

    #[test]
    fn rejects_bad_bpm_and_unknown_types() {
        assert!(BeatmapDecoder::decode_str(r#"{ "_notes": [] }"#, 0.0, "m").is_err());
        let data = r#"{ "_notes": [
            { "_time": 1.0, "_lineIndex": 0, "_lineLayer": 0, "_type": 7, "_cutDirection": 0 }
        ] }"#;
        assert!(BeatmapDecoder::decode_str(data, 100.0, "m").is_err());
    }
}
