//! Note lifecycle tracker.
//!
//! The arena is the only place a note's run state changes. Each note moves
//! `Pending → Active → Hit | Missed` once; terminal states are never left
//! until the next run resets the arena.
//!
//! The ActiveSet is a list of live chart indices in spawn order. Resolving a
//! note only flips its slot to a terminal state (O(1)); the list is compacted
//! once per tick in [`NoteArena::compact`], so iteration over a tick's live
//! notes is never invalidated mid-pass.

use saber_model::Chart;

use crate::judge::Verdict;

/// Run state of a single note.
///
/// The hit time lives inside `Hit`, so it exists exactly when the note was hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NoteState {
    #[default]
    Pending,
    Active,
    Hit {
        time: f32,
        good: bool,
    },
    Missed,
}

impl NoteState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Hit { .. } | Self::Missed)
    }

    pub fn hit_time(self) -> Option<f32> {
        match self {
            Self::Hit { time, .. } => Some(time),
            _ => None,
        }
    }
}

/// Resolution event emitted when a note leaves the ActiveSet.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteEvent {
    Hit {
        note_index: usize,
        id: String,
        good: bool,
        time: f32,
    },
    Miss {
        note_index: usize,
        id: String,
    },
}

impl NoteEvent {
    pub fn note_index(&self) -> usize {
        match self {
            Self::Hit { note_index, .. } | Self::Miss { note_index, .. } => *note_index,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Hit { id, .. } | Self::Miss { id, .. } => id,
        }
    }
}

/// Per-state note tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    pub pending: usize,
    pub active: usize,
    pub hit: usize,
    pub missed: usize,
}

/// Arena of note states indexed by chart index, plus the live ActiveSet.
#[derive(Debug, Clone)]
pub struct NoteArena {
    ids: Vec<String>,
    states: Vec<NoteState>,
    live: Vec<usize>,
}

impl NoteArena {
    pub fn new(chart: &Chart) -> Self {
        Self {
            ids: chart.notes().iter().map(|n| n.id.clone()).collect(),
            states: vec![NoteState::Pending; chart.len()],
            live: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<NoteState> {
        self.states.get(index).copied()
    }

    /// Pending → Active. Returns false (and does nothing) for any other state.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(state) if *state == NoteState::Pending => {
                *state = NoteState::Active;
                self.live.push(index);
                true
            }
            _ => false,
        }
    }

    /// Commit a judge verdict for an active note.
    ///
    /// `Good`/`Bad` record a hit at `time`; `Miss` records a miss. Pending
    /// verdicts, unknown indices and notes that are not active are silently
    /// ignored, so a second resolution attempt is always a no-op.
    pub fn resolve(&mut self, index: usize, verdict: Verdict, time: f32) -> Option<NoteEvent> {
        let state = self.states.get_mut(index)?;
        if !state.is_active() {
            return None;
        }
        let id = self.ids[index].clone();
        match verdict {
            Verdict::Good | Verdict::Bad => {
                let good = verdict == Verdict::Good;
                *state = NoteState::Hit { time, good };
                Some(NoteEvent::Hit {
                    note_index: index,
                    id,
                    good,
                    time,
                })
            }
            Verdict::Miss => {
                *state = NoteState::Missed;
                Some(NoteEvent::Miss {
                    note_index: index,
                    id,
                })
            }
            Verdict::Pending(_) => None,
        }
    }

    /// Drop resolved notes from the live list.
    pub fn compact(&mut self) {
        let states = &self.states;
        self.live.retain(|&i| states[i].is_active());
    }

    /// Live notes in spawn order.
    ///
    /// Before [`compact`](Self::compact) runs this may still list notes
    /// resolved earlier in the same tick; callers filter by state.
    pub fn live(&self) -> &[usize] {
        &self.live
    }

    /// Indices of notes currently in the Active state.
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.live.iter().copied().filter(|&i| self.states[i].is_active())
    }

    /// Discard the ActiveSet without resolving anything.
    pub fn abort(&mut self) {
        self.live.clear();
    }

    /// Every note back to Pending for a new run.
    pub fn reset(&mut self) {
        self.states.fill(NoteState::Pending);
        self.live.clear();
    }

    pub fn counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for state in &self.states {
            match state {
                NoteState::Pending => counts.pending += 1,
                NoteState::Active => counts.active += 1,
                NoteState::Hit { .. } => counts.hit += 1,
                NoteState::Missed => counts.missed += 1,
            }
        }
        counts
    }
}
