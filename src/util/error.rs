use std::path::Path;

/// User-friendly error messages for the command line.
pub struct UserError;

impl UserError {
    /// Get user-friendly message for song file not found.
    pub fn song_not_found(path: &Path) -> String {
        format!("Song file not found: {}", path.display())
    }

    /// Get user-friendly message for a song that parsed but cannot be played.
    pub fn invalid_chart(path: &Path) -> String {
        format!("Song file has an unplayable chart: {}", path.display())
    }

    /// Get user-friendly message for config load error.
    pub fn config_error(path: &Path) -> String {
        format!("Failed to load config file: {}", path.display())
    }

    /// Get user-friendly message for an unusable song tempo.
    pub fn invalid_tempo(bpm: f64) -> String {
        format!("Song tempo must be positive, got {bpm} BPM")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_song_not_found() {
        let msg = UserError::song_not_found(Path::new("/songs/yokohama/easy.json"));
        assert!(msg.contains("Song file not found"));
        assert!(msg.contains("easy.json"));
    }

    #[test]
    fn test_invalid_tempo() {
        let msg = UserError::invalid_tempo(-1.0);
        assert!(msg.contains("-1 BPM"));
    }
}
