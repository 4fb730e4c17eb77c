//! Telemetry record types emitted by the runner.

use std::time::Duration;

use serde::Serialize;

use crate::action::Action;
use crate::state::{AgentId, Position};

/// One telemetry record per agent per time step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub episode: u32,
    pub time_step: u32,
    pub agent_id: AgentId,
    pub location: Position,
    /// The action the policy issued for this agent on this step.
    pub action: Action,
    pub num_supplies: usize,
    pub num_enemies: usize,
    /// Steps per second, estimated from the fetch-and-submit round-trip.
    pub step_rate: u32,
    /// Depth buffer dimensions; present only when depth sensing is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_map_shape: Option<(usize, usize)>,
}

/// Emitted once per completed episode.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub steps: u64,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: Option<(usize, usize)>) -> StepRecord {
        StepRecord {
            episode: 0,
            time_step: 7,
            agent_id: 1,
            location: Position::new(1.0, 0.0, -2.0),
            action: Action::default(),
            num_supplies: 3,
            num_enemies: 1,
            step_rate: 50,
            depth_map_shape: depth,
        }
    }

    #[test]
    fn test_depth_shape_serialized_when_present() {
        let json = serde_json::to_string(&record(Some((64, 64)))).unwrap();
        assert!(json.contains("\"depth_map_shape\":[64,64]"));
    }

    #[test]
    fn test_depth_shape_omitted_when_absent() {
        let json = serde_json::to_string(&record(None)).unwrap();
        assert!(!json.contains("depth_map_shape"));
    }
}
