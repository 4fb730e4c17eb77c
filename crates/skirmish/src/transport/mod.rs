//! Engine boundary.
//!
//! The engine is an external collaborator reached through a fixed
//! request/response contract. `EngineTransport` captures that contract; the
//! gRPC implementation lives in the `skirmish-rpc` crate, and
//! [`mock::MockEngine`] provides a scripted in-process engine for tests.

pub mod mock;

use std::collections::HashMap;
use std::time::Duration;

use smallvec::SmallVec;

use crate::action::{Action, ActionVariable};
use crate::config::{GameConfig, GameMode, SupplyRules};
use crate::state::{AgentId, AgentState, Position};
use crate::Result;

/// Where an agent appears at episode start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPoint {
    Fixed(Position),
    /// Engine-chosen random location, derived from the session seed.
    Random,
}

/// Handshake payload sent once at session setup.
///
/// Built from a validated [`GameConfig`]; agent 0 spawns at the configured
/// start location, all further agents at engine-chosen random locations.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSetup {
    pub game_mode: GameMode,
    pub map_id: u32,
    pub random_seed: u64,
    pub episode_timeout: Duration,
    pub spawns: Vec<SpawnPoint>,
    pub available_actions: SmallVec<[ActionVariable; 8]>,
    pub use_depth_map: bool,
    pub record: bool,
    pub supply: SupplyRules,
}

impl SessionSetup {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut spawns = vec![SpawnPoint::Fixed(config.start_location)];
        spawns.extend((1..config.num_agents).map(|_| SpawnPoint::Random));

        Self {
            game_mode: config.game_mode,
            map_id: config.map_id,
            random_seed: config.random_seed,
            episode_timeout: config.episode_timeout,
            spawns,
            available_actions: config.available_actions.clone(),
            use_depth_map: config.use_depth_map,
            record: config.record,
            supply: config.supply.clone(),
        }
    }

    pub fn num_agents(&self) -> u32 {
        self.spawns.len() as u32
    }
}

/// Synchronous request/response contract with the engine.
///
/// One round-trip per call; implementations block until the engine answers
/// or the configured timeout elapses.
pub trait EngineTransport {
    /// Establish the connection and perform the one-shot session handshake.
    fn start_session(&mut self, setup: &SessionSetup) -> Result<()>;

    /// Label the engine-side recording of the next episode.
    fn set_replay_label(&mut self, label: &str) -> Result<()>;

    /// Reset the engine to a fresh episode.
    fn new_episode(&mut self) -> Result<()>;

    /// Whether the engine considers the current episode finished. The
    /// engine is the sole authority on termination.
    fn episode_finished(&mut self) -> Result<bool>;

    /// Current time step counter within the episode.
    fn time_step(&mut self) -> Result<u32>;

    /// Snapshot of every active agent, keyed by agent id.
    fn state_all(&mut self) -> Result<HashMap<AgentId, AgentState>>;

    /// Submit the joint action set atomically. The map must hold exactly
    /// one action per agent present in the preceding observation set.
    fn submit_actions(&mut self, actions: &HashMap<AgentId, Action>) -> Result<()>;

    /// Release the engine-side session.
    fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_spawns_first_agent_fixed_rest_random() {
        let config = GameConfig {
            num_agents: 3,
            start_location: Position::new(1.0, 2.0, 3.0),
            ..GameConfig::default()
        };
        let setup = SessionSetup::from_config(&config);

        assert_eq!(setup.num_agents(), 3);
        assert_eq!(
            setup.spawns[0],
            SpawnPoint::Fixed(Position::new(1.0, 2.0, 3.0))
        );
        assert_eq!(setup.spawns[1], SpawnPoint::Random);
        assert_eq!(setup.spawns[2], SpawnPoint::Random);
    }
}
