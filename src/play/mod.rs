mod autoplay;
mod beat_clock;
mod judgment;
mod note_state;
mod score;
mod session;

pub use autoplay::Autoplay;
pub use beat_clock::{BeatClock, ClockError};
pub use judgment::{HeldNote, HitResult, JudgmentEngine, SweepReport};
pub use note_state::{MissCause, NoteState, NoteStates};
pub use score::{ScoreEngine, ScoreSnapshot, Tier};
pub use session::{FrameReport, InputEdge, Outcome, OutcomeKind, Session};
