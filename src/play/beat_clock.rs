use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("Tempo must be a positive number of beats per minute, got {0}")]
    InvalidTempo(f64),
}

/// Playback clock measured in seconds, read out in beats.
///
/// The clock never samples wall time itself. The caller feeds it the real
/// elapsed time of each frame through [`BeatClock::advance`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeatClock {
    tempo: f64,
    offset: f64,
    position: f64,
    playing: bool,
}

impl BeatClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playback at `tempo` BPM.
    ///
    /// Beat 0 lands `offset` seconds after this call. A negative offset
    /// starts the clock already past beat 0.
    pub fn start(&mut self, tempo: f64, offset: f64) -> Result<(), ClockError> {
        if !(tempo.is_finite() && tempo > 0.0) {
            warn!("rejected clock start with tempo {tempo}");
            return Err(ClockError::InvalidTempo(tempo));
        }
        self.tempo = tempo;
        self.offset = offset;
        self.position = -offset;
        self.playing = true;
        debug!(tempo, offset, "clock started");
        Ok(())
    }

    /// Advance by the real elapsed time of one frame.
    pub fn advance(&mut self, delta_seconds: f64) {
        if !self.playing {
            return;
        }
        if delta_seconds < 0.0 {
            warn!("negative frame delta {delta_seconds}s clamped to zero");
            return;
        }
        self.position += delta_seconds;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Stop playback and rewind to position 0.
    pub fn stop(&mut self) {
        self.playing = false;
        self.position = 0.0;
    }

    /// Restore the never-started state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Seconds elapsed since the logical start. Negative during pre-roll.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Seconds per beat.
    pub fn crotchet(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Current musical position. 0 until the clock has been started.
    pub fn current_beat(&self) -> f64 {
        if self.tempo <= 0.0 {
            return 0.0;
        }
        self.position / self.crotchet()
    }
}
