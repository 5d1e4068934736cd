use tracing::{debug, trace};

use crate::model::{Chart, Key, NoteKind};

use super::note_state::{MissCause, NoteState, NoteStates};

/// Outcome of a single judgment attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// The attempt matched a note inside the window.
    /// `timing_diff` is in beats: negative = early, positive = late.
    Hit { note: usize, timing_diff: f64 },
    /// A hold was released outside the window around its end.
    /// The note is resolved as missed.
    Miss { note: usize, timing_diff: f64 },
    /// Nothing to judge: no matching active note, nothing held, or a hold
    /// already in progress.
    Empty,
}

impl HitResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn timing_diff(&self) -> Option<f64> {
        match self {
            Self::Hit { timing_diff, .. } | Self::Miss { timing_diff, .. } => Some(*timing_diff),
            Self::Empty => None,
        }
    }

    pub fn note(&self) -> Option<usize> {
        match self {
            Self::Hit { note, .. } | Self::Miss { note, .. } => Some(*note),
            Self::Empty => None,
        }
    }
}

/// The hold note currently being sustained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldNote {
    pub index: usize,
    pub key: Key,
    pub start_diff: f64,
}

/// What one window update did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Number of notes that entered the hit window.
    pub activated: usize,
    /// Chart indices of notes that expired this frame, in chart order.
    pub missed: Vec<usize>,
}

impl SweepReport {
    pub fn missed_count(&self) -> usize {
        self.missed.len()
    }
}

/// Matches input against the chart inside a symmetric window of
/// `hit_window` beats.
///
/// The engine never owns the chart. Every call takes the same `&Chart` the
/// engine was created for; notes are referred to by chart index.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentEngine {
    hit_window: f64,
    /// Next chart index not yet activated.
    cursor: usize,
    /// Active note indices, kept in chart order.
    active: Vec<usize>,
    held: Option<HeldNote>,
    states: NoteStates,
    hit_count: u32,
    miss_count: u32,
}

impl JudgmentEngine {
    pub fn new(chart: &Chart, hit_window: f64) -> Self {
        Self {
            hit_window,
            cursor: 0,
            active: Vec::new(),
            held: None,
            states: NoteStates::new(chart.len()),
            hit_count: 0,
            miss_count: 0,
        }
    }

    /// Reset matching state and tallies.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.active.clear();
        self.held = None;
        self.states.reset();
        self.hit_count = 0;
        self.miss_count = 0;
    }

    /// Move the window to `beat`: activate notes that entered it, then
    /// expire active notes that fell behind it.
    pub fn update(&mut self, chart: &Chart, beat: f64) -> SweepReport {
        debug_assert_eq!(chart.len(), self.states.len());
        let mut report = SweepReport::default();

        let window_end = beat + self.hit_window;
        while let Some(note) = chart.get(self.cursor) {
            if note.beat > window_end {
                break;
            }
            self.states.activate(self.cursor);
            self.active.push(self.cursor);
            self.cursor += 1;
            report.activated += 1;
        }

        let window_start = beat - self.hit_window;
        let notes = chart.notes();
        let states = &mut self.states;
        let missed = &mut report.missed;
        self.active.retain(|&index| {
            if notes[index].beat < window_start {
                states.miss(index, MissCause::Expired);
                missed.push(index);
                false
            } else {
                true
            }
        });
        self.miss_count += report.missed.len() as u32;

        if !report.missed.is_empty() {
            trace!(beat, missed = report.missed.len(), "notes expired");
        }
        report
    }

    /// Earliest active note for `key`, of any kind.
    pub fn next_active(&self, chart: &Chart, key: Key) -> Option<usize> {
        self.find_active(chart, key, None)
    }

    /// Judge a tap on `key` at `beat`.
    pub fn try_hit(&mut self, chart: &Chart, key: Key, beat: f64) -> HitResult {
        let Some(pos) = self.find_active_pos(chart, key, Some(NoteKind::Tap)) else {
            return HitResult::Empty;
        };
        let index = self.active.remove(pos);
        let timing_diff = beat - chart.notes()[index].beat;
        self.states.hit(index, timing_diff);
        self.hit_count += 1;
        trace!(index, timing_diff, "tap hit");
        HitResult::Hit {
            note: index,
            timing_diff,
        }
    }

    /// Begin holding a hold note on `key` at `beat`.
    /// Only one hold can be in progress.
    pub fn try_start_hold(&mut self, chart: &Chart, key: Key, beat: f64) -> HitResult {
        if self.held.is_some() {
            return HitResult::Empty;
        }
        let Some(pos) = self.find_active_pos(chart, key, Some(NoteKind::Hold)) else {
            return HitResult::Empty;
        };
        let index = self.active.remove(pos);
        let start_diff = beat - chart.notes()[index].beat;
        self.states.start_hold(index, start_diff);
        self.held = Some(HeldNote {
            index,
            key,
            start_diff,
        });
        trace!(index, start_diff, "hold started");
        HitResult::Hit {
            note: index,
            timing_diff: start_diff,
        }
    }

    /// Release the held note at `beat`. The release is judged against the
    /// end of the hold with the same window as everything else.
    pub fn try_release_hold(&mut self, chart: &Chart, beat: f64) -> HitResult {
        let Some(held) = self.held.take() else {
            return HitResult::Empty;
        };
        let timing_diff = beat - chart.notes()[held.index].end_beat();
        if timing_diff.abs() <= self.hit_window {
            self.states.complete_hold(held.index, timing_diff);
            self.hit_count += 1;
            trace!(index = held.index, timing_diff, "hold completed");
            HitResult::Hit {
                note: held.index,
                timing_diff,
            }
        } else {
            self.states.miss(held.index, MissCause::HoldFailed);
            self.miss_count += 1;
            debug!(index = held.index, timing_diff, "hold released off window");
            HitResult::Miss {
                note: held.index,
                timing_diff,
            }
        }
    }

    pub fn hit_window(&self) -> f64 {
        self.hit_window
    }

    /// Active, unresolved note indices in chart order.
    pub fn active_notes(&self) -> &[usize] {
        &self.active
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn held(&self) -> Option<HeldNote> {
        self.held
    }

    pub fn held_key(&self) -> Option<Key> {
        self.held.map(|h| h.key)
    }

    pub fn note_state(&self, index: usize) -> Option<NoteState> {
        self.states.get(index)
    }

    pub fn note_states(&self) -> &NoteStates {
        &self.states
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn miss_count(&self) -> u32 {
        self.miss_count
    }

    /// Every note resolved and nothing held.
    pub fn is_finished(&self) -> bool {
        self.held.is_none() && self.states.all_resolved()
    }

    fn find_active(&self, chart: &Chart, key: Key, kind: Option<NoteKind>) -> Option<usize> {
        self.find_active_pos(chart, key, kind)
            .map(|pos| self.active[pos])
    }

    // The active list is in chart order, so the first match is the earliest
    // beat, and among equal beats the earliest chart entry.
    fn find_active_pos(&self, chart: &Chart, key: Key, kind: Option<NoteKind>) -> Option<usize> {
        let notes = chart.notes();
        self.active.iter().position(|&index| {
            let note = &notes[index];
            note.key == key && kind.is_none_or(|k| note.kind == k)
        })
    }
}
