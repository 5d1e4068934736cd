//! Autoplay input generator.

use crate::model::Chart;

use super::session::InputEdge;

/// Pre-computed autoplay edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AutoplayEvent {
    beat: f64,
    edge: InputEdge,
}

/// Produces the input edges a player would send for a chart, optionally
/// shifted by a constant timing bias.
#[derive(Debug, Clone)]
pub struct Autoplay {
    events: Vec<AutoplayEvent>,
    current_index: usize,
}

impl Autoplay {
    /// How long a tap key stays down, in beats.
    pub const TAP_PRESS_BEATS: f64 = 0.125;

    /// `bias` is added to every edge: negative plays early, positive late.
    pub fn new(chart: &Chart, bias: f64) -> Self {
        let mut events = Vec::with_capacity(chart.len() * 2);

        for (_, note) in chart.iter() {
            events.push(AutoplayEvent {
                beat: note.beat + bias,
                edge: InputEdge::Pressed(note.key),
            });

            let release_beat = if note.is_hold() {
                note.end_beat()
            } else {
                note.beat + Self::TAP_PRESS_BEATS
            };
            events.push(AutoplayEvent {
                beat: release_beat + bias,
                edge: InputEdge::Released(note.key),
            });
        }

        // Stable: a press keeps its place ahead of a release on the same beat
        events.sort_by(|a, b| a.beat.total_cmp(&b.beat));

        Self {
            events,
            current_index: 0,
        }
    }

    /// Edges due at or before `beat`, each returned once.
    pub fn poll(&mut self, beat: f64) -> Vec<InputEdge> {
        let start = self.current_index;
        while let Some(event) = self.events.get(self.current_index) {
            if event.beat > beat {
                break;
            }
            self.current_index += 1;
        }
        self.events[start..self.current_index]
            .iter()
            .map(|e| e.edge)
            .collect()
    }

    pub fn is_done(&self) -> bool {
        self.current_index >= self.events.len()
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }
}
