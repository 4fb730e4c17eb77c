//! Sink trait and composites.

use std::sync::Mutex;

use super::{EpisodeSummary, StepRecord};

/// Receiver for telemetry emitted by the runner.
pub trait StepSink: Send + Sync {
    /// One record per agent per time step.
    fn record_step(&self, record: &StepRecord);

    /// Called once when an episode reaches completion.
    fn episode_end(&self, summary: &EpisodeSummary);

    /// Flush any pending writes.
    fn close(&self) {}
}

/// A sink that discards everything (default).
pub struct NoOpSink;

impl StepSink for NoOpSink {
    fn record_step(&self, _record: &StepRecord) {}
    fn episode_end(&self, _summary: &EpisodeSummary) {}
}

/// A sink that dispatches to multiple backends.
pub struct CompositeSink {
    sinks: Vec<Box<dyn StepSink>>,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Box<dyn StepSink>>) -> Self {
        Self { sinks }
    }

    pub fn add(&mut self, sink: Box<dyn StepSink>) {
        self.sinks.push(sink);
    }
}

impl StepSink for CompositeSink {
    fn record_step(&self, record: &StepRecord) {
        for sink in &self.sinks {
            sink.record_step(record);
        }
    }

    fn episode_end(&self, summary: &EpisodeSummary) {
        for sink in &self.sinks {
            sink.episode_end(summary);
        }
    }

    fn close(&self) {
        for sink in &self.sinks {
            sink.close();
        }
    }
}

/// A sink that buffers everything in memory, for assertions in tests.
#[derive(Default)]
pub struct MemorySink {
    steps: Mutex<Vec<StepRecord>>,
    episodes: Mutex<Vec<EpisodeSummary>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<StepRecord> {
        self.steps.lock().unwrap().clone()
    }

    pub fn episodes(&self) -> Vec<EpisodeSummary> {
        self.episodes.lock().unwrap().clone()
    }
}

impl StepSink for MemorySink {
    fn record_step(&self, record: &StepRecord) {
        self.steps.lock().unwrap().push(record.clone());
    }

    fn episode_end(&self, summary: &EpisodeSummary) {
        self.episodes.lock().unwrap().push(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::state::Position;
    use std::sync::Arc;
    use std::time::Duration;

    fn sample_record() -> StepRecord {
        StepRecord {
            episode: 0,
            time_step: 0,
            agent_id: 0,
            location: Position::default(),
            action: Action::default(),
            num_supplies: 0,
            num_enemies: 0,
            step_rate: 1,
            depth_map_shape: None,
        }
    }

    #[test]
    fn test_composite_fans_out() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());

        struct Shared(Arc<MemorySink>);
        impl StepSink for Shared {
            fn record_step(&self, record: &StepRecord) {
                self.0.record_step(record);
            }
            fn episode_end(&self, summary: &EpisodeSummary) {
                self.0.episode_end(summary);
            }
        }

        let composite = CompositeSink::new(vec![
            Box::new(Shared(a.clone())),
            Box::new(Shared(b.clone())),
        ]);
        composite.record_step(&sample_record());
        composite.episode_end(&EpisodeSummary {
            episode: 0,
            steps: 1,
            elapsed: Duration::from_millis(5),
        });

        assert_eq!(a.steps().len(), 1);
        assert_eq!(b.steps().len(), 1);
        assert_eq!(a.episodes().len(), 1);
        assert_eq!(b.episodes().len(), 1);
    }
}
