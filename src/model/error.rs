use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to read song file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse song file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown lane key: {0:?}")]
    UnknownKey(char),

    #[error("Note {index} has an invalid beat: {beat}")]
    InvalidBeat { index: usize, beat: f64 },

    #[error("Note {index} at beat {beat} comes before the previous note at beat {previous}")]
    Unsorted {
        index: usize,
        beat: f64,
        previous: f64,
    },

    #[error("Hold note {index} has a non-positive duration: {duration}")]
    InvalidHoldDuration { index: usize, duration: f64 },
}
