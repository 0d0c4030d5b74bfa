use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::note::{LANE_COUNT, LAYER_COUNT, Note};

/// An ordered, validated note chart.
///
/// Notes are sorted ascending by arrival time (stable, so equal-time notes keep
/// their authored order). The chart never changes after construction; engines
/// share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    title: String,
    notes: Vec<Note>,
    index_by_id: HashMap<String, usize>,
}

impl Chart {
    /// Build a chart, re-sorting out-of-order notes and rejecting invalid ones.
    pub fn new(title: impl Into<String>, mut notes: Vec<Note>) -> Result<Self> {
        for note in &notes {
            if note.id.is_empty() {
                bail!("note at {}s has an empty id", note.time);
            }
            if !note.time.is_finite() || note.time < 0.0 {
                bail!("note '{}' has invalid arrival time {}", note.id, note.time);
            }
            if note.lane >= LANE_COUNT {
                bail!(
                    "note '{}' lane {} out of range 0..{}",
                    note.id,
                    note.lane,
                    LANE_COUNT
                );
            }
            if note.layer >= LAYER_COUNT {
                bail!(
                    "note '{}' layer {} out of range 0..{}",
                    note.id,
                    note.layer,
                    LAYER_COUNT
                );
            }
        }

        if notes.windows(2).any(|w| w[1].time < w[0].time) {
            log::warn!("chart notes out of order, re-sorting by arrival time");
            notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        }

        let mut index_by_id = HashMap::with_capacity(notes.len());
        for (i, note) in notes.iter().enumerate() {
            if index_by_id.insert(note.id.clone(), i).is_some() {
                bail!("duplicate note id '{}'", note.id);
            }
        }

        Ok(Self {
            title: title.into(),
            notes,
            index_by_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Arrival time of the last note, 0 for an empty chart.
    pub fn duration(&self) -> f32 {
        self.notes.last().map_or(0.0, |n| n.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{CutDirection, Hand};

    fn note(id: &str, time: f32) -> Note {
        Note::new(id, time, 1, 0, Hand::Left, CutDirection::Any)
    }

    #[test]
    fn sorts_out_of_order_notes() {
        let chart = Chart::new("t", vec![note("b", 2.0), note("a", 1.0), note("c", 3.0)]).unwrap();
        let ids: Vec<_> = chart.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(chart.index_of("b"), Some(1));
        assert!((chart.duration() - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn equal_times_keep_authored_order() {
        let chart = Chart::new(
            "t",
            vec![note("z", 2.0), note("y", 1.0), note("x", 2.0), note("w", 2.0)],
        )
        .unwrap();
        let ids: Vec<_> = chart.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["y", "z", "x", "w"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Chart::new("t", vec![note("a", 1.0), note("a", 2.0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_out_of_range_lane_and_layer() {
        let mut bad_lane = note("a", 1.0);
        bad_lane.lane = LANE_COUNT;
        assert!(Chart::new("t", vec![bad_lane]).is_err());

        let mut bad_layer = note("a", 1.0);
        bad_layer.layer = LAYER_COUNT;
        assert!(Chart::new("t", vec![bad_layer]).is_err());
    }

    #[test]
    fn rejects_invalid_times_and_ids() {
        assert!(Chart::new("t", vec![note("a", f32::NAN)]).is_err());
        assert!(Chart::new("t", vec![note("a", -1.0)]).is_err());
        assert!(Chart::new("t", vec![note("", 1.0)]).is_err());
    }

    proptest::proptest! {
        #[test]
        fn chart_is_always_time_sorted(times in proptest::collection::vec(0.0f32..600.0, 0..64)) {
            let notes = times
                .iter()
                .enumerate()
                .map(|(i, &t)| note(&format!("n{i}"), t))
                .collect();
            let chart = Chart::new("p", notes).unwrap();
            proptest::prop_assert_eq!(chart.len(), times.len());
            proptest::prop_assert!(chart.notes().windows(2).all(|w| w[0].time <= w[1].time));
            for (i, n) in chart.notes().iter().enumerate() {
                proptest::prop_assert_eq!(chart.index_of(&n.id), Some(i));
            }
        }
    }

    #[test]
    fn empty_chart() {
        let chart = Chart::new("empty", Vec::new()).unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart.duration(), 0.0);
        assert_eq!(chart.get(0), None);
    }
}
