//! Test utilities for building charts and simulating input traces.
//!
//! This module provides helpers for creating test fixtures in a fluent manner.

#[cfg(test)]
pub mod builders {
    use crate::model::{Chart, Key, Note};

    /// Builder for creating test charts. Notes may be added in any order.
    #[derive(Debug, Default)]
    pub struct ChartBuilder {
        notes: Vec<Note>,
    }

    impl ChartBuilder {
        pub fn new() -> Self {
            Self { notes: Vec::new() }
        }

        /// Add a note to the chart.
        pub fn add(mut self, note: Note) -> Self {
            self.notes.push(note);
            self
        }

        /// Add a tap note.
        pub fn tap(self, key: Key, beat: f64) -> Self {
            self.add(Note::tap(key, beat))
        }

        /// Add a hold note.
        pub fn hold(self, key: Key, beat: f64, duration: f64) -> Self {
            self.add(Note::hold(key, beat, duration))
        }

        /// Build the chart, sorting by beat.
        pub fn build(self) -> Chart {
            Chart::from_unsorted(self.notes).expect("test chart must be valid")
        }
    }

    /// Create a chart of evenly spaced taps cycling through the lane keys.
    pub fn create_tap_run(note_count: usize, interval_beats: f64) -> Chart {
        let mut builder = ChartBuilder::new();
        for i in 0..note_count {
            let key = Key::all()[i % Key::all().len()];
            builder = builder.tap(key, (i + 1) as f64 * interval_beats);
        }
        builder.build()
    }
}

#[cfg(test)]
pub mod input_sim {
    use crate::model::Key;
    use crate::play::{FrameReport, InputEdge, Session};

    /// One frame of simulated play.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Frame {
        pub delta: f64,
        pub edges: Vec<InputEdge>,
    }

    /// Fixed-step input trace for driving a session.
    #[derive(Debug, Clone, Default)]
    pub struct InputSimulator {
        frames: Vec<Frame>,
    }

    impl InputSimulator {
        pub fn new() -> Self {
            Self { frames: Vec::new() }
        }

        /// Add a frame with no input.
        pub fn idle(mut self, delta: f64) -> Self {
            self.frames.push(Frame {
                delta,
                edges: Vec::new(),
            });
            self
        }

        /// Add a frame with a press.
        pub fn press(mut self, delta: f64, key: Key) -> Self {
            self.frames.push(Frame {
                delta,
                edges: vec![InputEdge::Pressed(key)],
            });
            self
        }

        /// Add a frame with a release.
        pub fn release(mut self, delta: f64, key: Key) -> Self {
            self.frames.push(Frame {
                delta,
                edges: vec![InputEdge::Released(key)],
            });
            self
        }

        pub fn frames(&self) -> &[Frame] {
            &self.frames
        }

        /// Feed every frame to the session and collect the reports.
        pub fn run(&self, session: &mut Session) -> Vec<FrameReport> {
            self.frames
                .iter()
                .map(|f| session.frame(f.delta, &f.edges))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::builders::*;
    use super::input_sim::*;
    use crate::config::PlayConfig;
    use crate::model::{Key, NoteKind};
    use crate::play::{InputEdge, Session};

    #[test]
    fn test_chart_builder_sorts() {
        let chart = ChartBuilder::new()
            .tap(Key::A, 2.0)
            .hold(Key::S, 1.0, 0.5)
            .build();

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.notes()[0].kind, NoteKind::Hold);
        assert_eq!(chart.notes()[1].beat, 2.0);
    }

    #[test]
    fn test_create_tap_run() {
        let chart = create_tap_run(9, 0.5);
        assert_eq!(chart.len(), 9);
        assert_eq!(chart.notes()[0].beat, 0.5);
        assert_eq!(chart.notes()[7].key, Key::A);
    }

    #[test]
    fn test_input_simulator_runs_frames() {
        let chart = ChartBuilder::new().tap(Key::F, 1.0).build();
        let mut session = Session::new(chart, PlayConfig::default()).unwrap();
        session.start(60.0, 0.0).unwrap();

        let sim = InputSimulator::new()
            .idle(0.5)
            .press(0.5, Key::F)
            .release(0.1, Key::F);
        assert_eq!(sim.frames()[1].edges, vec![InputEdge::Pressed(Key::F)]);

        let reports = sim.run(&mut session);
        assert_eq!(reports.len(), 3);
        assert!(reports[1].outcomes[0].success);
        assert!(reports[2].outcomes.is_empty());
    }
}
