//! Console telemetry backend.

use super::{EpisodeSummary, StepRecord, StepSink};
use crate::utils::format_duration;

/// Sink that prints one JSON object per step via `tracing`.
pub struct ConsoleSink;

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl StepSink for ConsoleSink {
    fn record_step(&self, record: &StepRecord) {
        match serde_json::to_string(record) {
            Ok(line) => tracing::info!(target: "skirmish::telemetry", "{line}"),
            Err(err) => tracing::warn!(error = %err, "failed to encode step record"),
        }
    }

    fn episode_end(&self, summary: &EpisodeSummary) {
        tracing::info!(
            episode = summary.episode,
            steps = summary.steps,
            elapsed = %format_duration(summary.elapsed.as_secs_f64()),
            "episode finished"
        );
    }
}
