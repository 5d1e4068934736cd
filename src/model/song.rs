use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::chart::Chart;
use super::error::ChartError;
use super::note::Note;

/// Song metadata plus its raw note list, as stored in a song JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(alias = "BPM")]
    pub bpm: f64,
    #[serde(default)]
    pub audio_file: String,
    /// Seconds from clock start to beat 0.
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Song {
    /// Load a song from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ChartError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the playable chart. Notes are sorted by beat first.
    pub fn chart(&self) -> Result<Chart, ChartError> {
        Chart::from_unsorted(self.notes.clone())
    }
}
