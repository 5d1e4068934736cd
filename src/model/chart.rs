use super::error::ChartError;
use super::note::Note;

/// Ordered, immutable note sequence.
///
/// Notes are addressed by their index in the chart. Construction validates
/// the ordering and hold lengths, so every `Chart` value upholds:
/// - beats are finite, non-negative, and non-decreasing
/// - hold notes have a finite duration greater than zero
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    notes: Vec<Note>,
}

impl Chart {
    /// Build a chart from notes that are already sorted by beat.
    pub fn new(notes: Vec<Note>) -> Result<Self, ChartError> {
        let mut previous = 0.0_f64;
        for (index, note) in notes.iter().enumerate() {
            if !note.beat.is_finite() || note.beat < 0.0 {
                return Err(ChartError::InvalidBeat {
                    index,
                    beat: note.beat,
                });
            }
            if note.beat < previous {
                return Err(ChartError::Unsorted {
                    index,
                    beat: note.beat,
                    previous,
                });
            }
            if note.is_hold() && !(note.duration.is_finite() && note.duration > 0.0) {
                return Err(ChartError::InvalidHoldDuration {
                    index,
                    duration: note.duration,
                });
            }
            previous = note.beat;
        }
        Ok(Self { notes })
    }

    /// Build a chart from notes in any order.
    /// Notes on the same beat keep their relative order.
    pub fn from_unsorted(mut notes: Vec<Note>) -> Result<Self, ChartError> {
        notes.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        Self::new(notes)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.notes.iter().enumerate()
    }

    /// Number of hold notes in the chart.
    pub fn hold_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_hold()).count()
    }

    /// Last beat at which any note still needs input.
    pub fn last_end_beat(&self) -> f64 {
        self.notes
            .iter()
            .map(Note::end_beat)
            .fold(0.0, f64::max)
    }

    /// Notes a lane renderer should draw at `current_beat`.
    ///
    /// A note is visible while its end (the tail for holds) is no more than
    /// `look_behind` beats in the past and its head is no more than
    /// `look_ahead` beats in the future.
    pub fn visible_notes(
        &self,
        current_beat: f64,
        look_ahead: f64,
        look_behind: f64,
    ) -> impl Iterator<Item = (usize, &Note)> {
        let horizon = current_beat + look_ahead;
        let trail = current_beat - look_behind;
        self.iter()
            .take_while(move |(_, n)| n.beat <= horizon)
            .filter(move |(_, n)| n.end_beat() >= trail)
    }
}
