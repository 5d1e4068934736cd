/// Why a note ended up missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissCause {
    /// Left the hit window without being judged.
    Expired,
    /// Hold released outside the window around its end.
    HoldFailed,
}

/// Lifecycle of a single chart note.
///
/// `Pending -> Active -> Hit | Missed`, with hold notes taking
/// `Active -> Holding -> Hit | Missed`. `Hit` and `Missed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteState {
    Pending,
    Active,
    Holding { start_diff: f64 },
    Hit { timing_diff: f64 },
    Missed(MissCause),
}

impl NoteState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hit { .. } | Self::Missed(_))
    }
}

/// Per-note states indexed by chart position.
///
/// Every transition checks the current state, so a resolved note can never
/// be reopened no matter what the caller asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteStates {
    states: Vec<NoteState>,
}

impl NoteStates {
    pub fn new(note_count: usize) -> Self {
        Self {
            states: vec![NoteState::Pending; note_count],
        }
    }

    pub fn reset(&mut self) {
        for state in &mut self.states {
            *state = NoteState::Pending;
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NoteState> {
        self.states.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteState> {
        self.states.iter()
    }

    /// Pending -> Active.
    pub fn activate(&mut self, index: usize) -> bool {
        self.transition(index, |s| s.is_pending(), NoteState::Active)
    }

    /// Active -> Hit.
    pub fn hit(&mut self, index: usize, timing_diff: f64) -> bool {
        self.transition(index, |s| s.is_active(), NoteState::Hit { timing_diff })
    }

    /// Active -> Holding.
    pub fn start_hold(&mut self, index: usize, start_diff: f64) -> bool {
        self.transition(index, |s| s.is_active(), NoteState::Holding { start_diff })
    }

    /// Holding -> Hit.
    pub fn complete_hold(&mut self, index: usize, timing_diff: f64) -> bool {
        self.transition(
            index,
            |s| matches!(s, NoteState::Holding { .. }),
            NoteState::Hit { timing_diff },
        )
    }

    /// Active or Holding -> Missed.
    pub fn miss(&mut self, index: usize, cause: MissCause) -> bool {
        self.transition(
            index,
            |s| matches!(s, NoteState::Active | NoteState::Holding { .. }),
            NoteState::Missed(cause),
        )
    }

    pub fn all_resolved(&self) -> bool {
        self.states.iter().all(NoteState::is_terminal)
    }

    fn transition(
        &mut self,
        index: usize,
        allowed: impl Fn(&NoteState) -> bool,
        next: NoteState,
    ) -> bool {
        match self.states.get_mut(index) {
            Some(state) if allowed(state) => {
                *state = next;
                true
            }
            _ => false,
        }
    }
}
