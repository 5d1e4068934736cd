use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ChartError;

/// Number of lane keys in the input alphabet.
pub const LANE_COUNT: usize = 7;

/// A lane key. The chart and the input layer share this alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Key {
    A,
    S,
    D,
    F,
    J,
    K,
    L,
}

impl Key {
    /// Returns all keys in lane order (left to right).
    pub fn all() -> &'static [Key] {
        &[Key::A, Key::S, Key::D, Key::F, Key::J, Key::K, Key::L]
    }

    /// Returns the lane index (0-based).
    pub fn index(self) -> usize {
        match self {
            Key::A => 0,
            Key::S => 1,
            Key::D => 2,
            Key::F => 3,
            Key::J => 4,
            Key::K => 5,
            Key::L => 6,
        }
    }

    /// Create a key from a 0-based lane index.
    pub fn from_index(index: usize) -> Option<Key> {
        Self::all().get(index).copied()
    }

    /// Parse a key from its character, ignoring case.
    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_uppercase() {
            'A' => Some(Key::A),
            'S' => Some(Key::S),
            'D' => Some(Key::D),
            'F' => Some(Key::F),
            'J' => Some(Key::J),
            'K' => Some(Key::K),
            'L' => Some(Key::L),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Key::A => 'A',
            Key::S => 'S',
            Key::D => 'D',
            Key::F => 'F',
            Key::J => 'J',
            Key::K => 'K',
            Key::L => 'L',
        }
    }
}

impl TryFrom<char> for Key {
    type Error = ChartError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Key::from_char(c).ok_or(ChartError::UnknownKey(c))
    }
}

impl From<Key> for char {
    fn from(key: Key) -> Self {
        key.as_char()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Kind of note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    #[serde(alias = "tap", alias = "TAP")]
    Tap,
    #[serde(alias = "hold", alias = "HOLD")]
    Hold,
}

/// A single chart entry, positioned in beats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub beat: f64,
    #[serde(rename = "type", alias = "kind")]
    pub kind: NoteKind,
    /// Hold length in beats. Ignored for tap notes.
    #[serde(default)]
    pub duration: f64,
    pub key: Key,
}

impl Note {
    /// Create a new tap note.
    pub fn tap(key: Key, beat: f64) -> Self {
        Self {
            beat,
            kind: NoteKind::Tap,
            duration: 0.0,
            key,
        }
    }

    /// Create a new hold note.
    pub fn hold(key: Key, beat: f64, duration: f64) -> Self {
        Self {
            beat,
            kind: NoteKind::Hold,
            duration,
            key,
        }
    }

    /// Returns true if this is a hold note.
    pub fn is_hold(&self) -> bool {
        self.kind == NoteKind::Hold
    }

    /// Beat at which the note stops needing input.
    /// For taps this is the note beat itself.
    pub fn end_beat(&self) -> f64 {
        match self.kind {
            NoteKind::Tap => self.beat,
            NoteKind::Hold => self.beat + self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_index_round_trip() {
        for (i, key) in Key::all().iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
        assert_eq!(Key::from_index(LANE_COUNT), None);
    }

    #[test]
    fn key_from_char_ignores_case() {
        assert_eq!(Key::from_char('j'), Some(Key::J));
        assert_eq!(Key::from_char('L'), Some(Key::L));
        assert_eq!(Key::from_char('x'), None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Key::try_from('Q').unwrap_err();
        assert!(matches!(err, ChartError::UnknownKey('Q')));
    }

    #[test]
    fn hold_end_beat() {
        assert_eq!(Note::hold(Key::D, 5.0, 2.0).end_beat(), 7.0);
        assert_eq!(Note::tap(Key::D, 5.0).end_beat(), 5.0);
    }

    #[test]
    fn deserialize_note_json() {
        let note: Note =
            serde_json::from_str(r#"{"beat": 4.5, "type": "Hold", "duration": 1.5, "key": "f"}"#)
                .unwrap();
        assert_eq!(note, Note::hold(Key::F, 4.5, 1.5));

        let tap: Note = serde_json::from_str(r#"{"beat": 1, "type": "tap", "key": "A"}"#).unwrap();
        assert_eq!(tap, Note::tap(Key::A, 1.0));
    }
}
