// Native JSON chart format decoder

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::Chart;
use crate::note::{CutDirection, Hand, Note};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartFile {
    #[serde(default)]
    title: String,
    notes: Vec<NoteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteEntry {
    #[serde(default)]
    id: Option<String>,
    time: f32,
    line_index: u8,
    line_layer: u8,
    #[serde(rename = "type")]
    hand: Hand,
    #[serde(default)]
    cut_direction: CutDirection,
}

/// Decoder for the native chart format:
///
/// ```json
/// { "title": "...", "notes": [
///   { "id": "n0", "time": 2.0, "lineIndex": 1, "lineLayer": 0,
///     "type": "left", "cutDirection": "any" } ] }
/// ```
///
/// Notes without an id get `n{index}` in file order.
pub struct ChartDecoder;

impl ChartDecoder {
    pub fn decode(path: &Path) -> Result<Chart> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read chart {}", path.display()))?;
        Self::decode_str(&data).with_context(|| format!("invalid chart {}", path.display()))
    }

    pub fn decode_str(data: &str) -> Result<Chart> {
        let file: ChartFile = serde_json::from_str(data)?;
        let notes = file
            .notes
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Note {
                id: entry.id.unwrap_or_else(|| format!("n{i}")),
                time: entry.time,
                lane: entry.line_index,
                layer: entry.line_layer,
                hand: entry.hand,
                direction: entry.cut_direction,
            })
            .collect();
        Chart::new(file.title, notes)
    }
}
