// Chart data: notes, the validated chart, and the song file it comes from.

pub mod chart;
pub mod error;
pub mod note;
pub mod song;

pub use chart::Chart;
pub use error::ChartError;
pub use note::{Key, LANE_COUNT, Note, NoteKind};
pub use song::Song;
