use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, PlayConfig};
use crate::model::{Chart, Key, Note, NoteKind};

use super::beat_clock::{BeatClock, ClockError};
use super::judgment::{HitResult, JudgmentEngine};
use super::score::{ScoreEngine, ScoreSnapshot, Tier};

/// A debounced key edge from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputEdge {
    Pressed(Key),
    Released(Key),
}

impl InputEdge {
    pub fn key(self) -> Key {
        match self {
            Self::Pressed(key) | Self::Released(key) => key,
        }
    }
}

/// What produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeKind {
    /// A note left the window unjudged.
    Expired,
    Tap,
    HoldStart,
    HoldRelease,
    /// A press with nothing to judge.
    EmptyPress,
}

/// One resolved event, for feedback and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub key: Key,
    pub note: Option<usize>,
    pub success: bool,
    pub tier: Option<Tier>,
    pub timing_diff: Option<f64>,
}

impl Outcome {
    fn empty_press(key: Key) -> Self {
        Self {
            kind: OutcomeKind::EmptyPress,
            key,
            note: None,
            success: false,
            tier: None,
            timing_diff: None,
        }
    }
}

/// Everything one frame produced, in occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub beat: f64,
    pub outcomes: Vec<Outcome>,
    /// Notes that expired during this frame's sweep.
    pub missed: usize,
}

/// One match: a chart, its clock, and the judgment and score state built
/// on top of it.
///
/// Each [`Session::frame`] runs clock advance, window update, expiry
/// sweep, then the input edges in order. Score updates follow each
/// judgment immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    chart: Chart,
    config: PlayConfig,
    clock: BeatClock,
    judgment: JudgmentEngine,
    score: ScoreEngine,
}

impl Session {
    pub fn new(chart: Chart, config: PlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let judgment = JudgmentEngine::new(&chart, config.hit_window);
        let score = ScoreEngine::new(config.score.clone());
        Ok(Self {
            chart,
            config,
            clock: BeatClock::new(),
            judgment,
            score,
        })
    }

    pub fn start(&mut self, tempo: f64, offset: f64) -> Result<(), ClockError> {
        self.clock.start(tempo, offset)?;
        info!(
            tempo,
            offset,
            notes = self.chart.len(),
            "session started"
        );
        Ok(())
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        debug!("session stopped");
    }

    /// Back to the state of a freshly created session on the same chart.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.judgment.reset();
        self.score.reset();
        debug!("session reset");
    }

    /// Run one frame. Edges are dropped while the clock is not playing.
    pub fn frame(&mut self, delta_seconds: f64, edges: &[InputEdge]) -> FrameReport {
        if !self.clock.is_playing() {
            return FrameReport {
                beat: self.clock.current_beat(),
                ..Default::default()
            };
        }

        self.clock.advance(delta_seconds);
        let beat = self.clock.current_beat();

        let sweep = self.judgment.update(&self.chart, beat);
        let mut outcomes = Vec::with_capacity(sweep.missed_count() + edges.len());
        for &index in &sweep.missed {
            self.score.record_miss();
            outcomes.push(Outcome {
                kind: OutcomeKind::Expired,
                key: self.chart.notes()[index].key,
                note: Some(index),
                success: false,
                tier: Some(Tier::Bad),
                timing_diff: None,
            });
        }

        for &edge in edges {
            let outcome = match edge {
                InputEdge::Pressed(key) => Some(self.press(key, beat)),
                InputEdge::Released(key) => self.release(key, beat),
            };
            outcomes.extend(outcome);
        }

        FrameReport {
            beat,
            outcomes,
            missed: sweep.missed_count(),
        }
    }

    // A press goes to the earliest active note on its key: hold notes start
    // a hold, tap notes are hit.
    fn press(&mut self, key: Key, beat: f64) -> Outcome {
        let target = self
            .judgment
            .next_active(&self.chart, key)
            .map(|index| self.chart.notes()[index].kind);

        match target {
            Some(NoteKind::Tap) => match self.judgment.try_hit(&self.chart, key, beat) {
                HitResult::Hit { note, timing_diff } => Outcome {
                    kind: OutcomeKind::Tap,
                    key,
                    note: Some(note),
                    success: true,
                    tier: Some(self.score.record_hit(timing_diff)),
                    timing_diff: Some(timing_diff),
                },
                _ => Outcome::empty_press(key),
            },
            Some(NoteKind::Hold) => {
                match self.judgment.try_start_hold(&self.chart, key, beat) {
                    // The hold is scored once, on release.
                    HitResult::Hit { note, timing_diff } => Outcome {
                        kind: OutcomeKind::HoldStart,
                        key,
                        note: Some(note),
                        success: true,
                        tier: Some(self.score.classify(timing_diff)),
                        timing_diff: Some(timing_diff),
                    },
                    _ => Outcome::empty_press(key),
                }
            }
            None => Outcome::empty_press(key),
        }
    }

    fn release(&mut self, key: Key, beat: f64) -> Option<Outcome> {
        if self.judgment.held_key() != Some(key) {
            return None;
        }
        let outcome = match self.judgment.try_release_hold(&self.chart, beat) {
            HitResult::Hit { note, timing_diff } => Outcome {
                kind: OutcomeKind::HoldRelease,
                key,
                note: Some(note),
                success: true,
                tier: Some(self.score.record_hit(timing_diff)),
                timing_diff: Some(timing_diff),
            },
            HitResult::Miss { note, timing_diff } => {
                self.score.record_miss();
                Outcome {
                    kind: OutcomeKind::HoldRelease,
                    key,
                    note: Some(note),
                    success: false,
                    tier: Some(Tier::Bad),
                    timing_diff: Some(timing_diff),
                }
            }
            HitResult::Empty => return None,
        };
        Some(outcome)
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    pub fn clock(&self) -> &BeatClock {
        &self.clock
    }

    pub fn judgment(&self) -> &JudgmentEngine {
        &self.judgment
    }

    pub fn score(&self) -> &ScoreEngine {
        &self.score
    }

    pub fn current_beat(&self) -> f64 {
        self.clock.current_beat()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Active, unresolved notes in chart order.
    pub fn active_notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        let notes = self.chart.notes();
        self.judgment
            .active_notes()
            .iter()
            .map(move |&index| (index, &notes[index]))
    }

    /// Notes to draw at the current beat, using the configured look range.
    pub fn visible_notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.chart.visible_notes(
            self.clock.current_beat(),
            self.config.look_ahead_beats,
            self.config.look_behind_beats,
        )
    }

    pub fn is_holding(&self) -> bool {
        self.judgment.is_holding()
    }

    pub fn held_key(&self) -> Option<Key> {
        self.judgment.held_key()
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.score.snapshot()
    }

    /// Every note resolved and nothing held.
    pub fn is_finished(&self) -> bool {
        self.judgment.is_finished()
    }
}
