//! Scripted in-process engine for exercising the layers above the
//! transport boundary without a running engine.

use std::collections::HashMap;

use super::{EngineTransport, SessionSetup};
use crate::action::Action;
use crate::state::{AgentId, AgentState, DepthMap, EnemyInfo, Position, SupplyInfo};
use crate::{EngineError, Result};

/// Scripted failure injected into a [`MockEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFailure {
    /// Refuse the session handshake.
    ConnectRefused,
    /// Fail the action submission at the given time step.
    SubmitErrorAt(u32),
    /// Report the episode as never finishing.
    NeverFinish,
}

/// In-process engine with deterministic observations.
///
/// Episodes run for a fixed number of steps. Every call is recorded so
/// tests can assert on reset counts, replay labels, and submitted joint
/// actions.
pub struct MockEngine {
    episode_len: u32,
    depth_shape: (usize, usize),
    empty_ammo_at: Option<u32>,
    failure: Option<MockFailure>,

    setup: Option<SessionSetup>,
    tick: u32,
    episode_active: bool,
    resets: u32,
    labels: Vec<String>,
    submissions: Vec<HashMap<AgentId, Action>>,
    close_calls: u32,
}

impl MockEngine {
    pub fn new(episode_len: u32) -> Self {
        Self {
            episode_len,
            depth_shape: (64, 64),
            empty_ammo_at: None,
            failure: None,
            setup: None,
            tick: 0,
            episode_active: false,
            resets: 0,
            labels: Vec::new(),
            submissions: Vec::new(),
            close_calls: 0,
        }
    }

    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_depth_shape(mut self, rows: usize, cols: usize) -> Self {
        self.depth_shape = (rows, cols);
        self
    }

    /// Report an empty magazine (with spare rounds) at the given time step.
    pub fn with_empty_ammo_at(mut self, time_step: u32) -> Self {
        self.empty_ammo_at = Some(time_step);
        self
    }

    pub fn setup(&self) -> Option<&SessionSetup> {
        self.setup.as_ref()
    }

    /// Number of `new_episode` calls seen.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Every joint action set submitted, in order.
    pub fn submissions(&self) -> &[HashMap<AgentId, Action>] {
        &self.submissions
    }

    pub fn close_calls(&self) -> u32 {
        self.close_calls
    }

    fn session(&self) -> Result<&SessionSetup> {
        self.setup
            .as_ref()
            .ok_or_else(|| EngineError::Engine("no active session".to_string()))
    }

    fn agent_state(&self, agent_id: AgentId, setup: &SessionSetup) -> AgentState {
        let t = self.tick as f32;
        let position = Position::new(agent_id as f32 * 2.0 + t * 0.1, 0.0, agent_id as f32);

        let supply_states = (0..2 + self.tick % 3)
            .map(|i| SupplyInfo {
                id: i,
                position: Position::new(i as f32 * 5.0, 0.0, 10.0),
                quantity: 5,
            })
            .collect();

        let enemy_states = (0..setup.num_agents())
            .filter(|&other| other != agent_id)
            .map(|other| EnemyInfo {
                id: other,
                position: Position::new(other as f32 * 2.0 + t * 0.1, 0.0, other as f32),
                health: 100.0,
            })
            .collect();

        let weapon_ammo = match self.empty_ammo_at {
            Some(step) if step == self.tick => 0,
            _ => 10,
        };

        let depth_map = if setup.use_depth_map {
            let (rows, cols) = self.depth_shape;
            DepthMap::from_raw(rows, cols, vec![0.5; rows * cols])
        } else {
            None
        };

        AgentState {
            position,
            pitch: 0.0,
            yaw: (self.tick % 360) as f32,
            health: 100.0,
            weapon_ammo,
            spare_ammo: 30,
            supply_states,
            enemy_states,
            depth_map,
        }
    }
}

impl EngineTransport for MockEngine {
    fn start_session(&mut self, setup: &SessionSetup) -> Result<()> {
        if self.failure == Some(MockFailure::ConnectRefused) {
            return Err(EngineError::Connection {
                endpoint: "mock:0".to_string(),
                message: "connection refused".to_string(),
            });
        }
        self.setup = Some(setup.clone());
        Ok(())
    }

    fn set_replay_label(&mut self, label: &str) -> Result<()> {
        self.session()?;
        self.labels.push(label.to_string());
        Ok(())
    }

    fn new_episode(&mut self) -> Result<()> {
        self.session()?;
        self.resets += 1;
        self.tick = 0;
        self.episode_active = true;
        Ok(())
    }

    fn episode_finished(&mut self) -> Result<bool> {
        self.session()?;
        if !self.episode_active {
            return Err(EngineError::Engine("no active episode".to_string()));
        }
        if self.failure == Some(MockFailure::NeverFinish) {
            return Ok(false);
        }
        Ok(self.tick >= self.episode_len)
    }

    fn time_step(&mut self) -> Result<u32> {
        self.session()?;
        Ok(self.tick)
    }

    fn state_all(&mut self) -> Result<HashMap<AgentId, AgentState>> {
        let setup = self.session()?.clone();
        Ok((0..setup.num_agents())
            .map(|agent_id| (agent_id, self.agent_state(agent_id, &setup)))
            .collect())
    }

    fn submit_actions(&mut self, actions: &HashMap<AgentId, Action>) -> Result<()> {
        self.session()?;
        if self.failure == Some(MockFailure::SubmitErrorAt(self.tick)) {
            return Err(EngineError::Transport {
                call: "submit_actions",
                message: "engine hung up".to_string(),
            });
        }
        self.submissions.push(actions.clone());
        self.tick += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.setup = None;
        self.episode_active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn setup_for(num_agents: u32, use_depth_map: bool) -> SessionSetup {
        SessionSetup::from_config(&GameConfig {
            num_agents,
            use_depth_map,
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_episode_runs_for_configured_length() {
        let mut engine = MockEngine::new(3);
        engine.start_session(&setup_for(1, false)).unwrap();
        engine.new_episode().unwrap();

        let mut steps = 0;
        while !engine.episode_finished().unwrap() {
            let actions = engine
                .state_all()
                .unwrap()
                .keys()
                .map(|&id| (id, Action::default()))
                .collect();
            engine.submit_actions(&actions).unwrap();
            steps += 1;
        }
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_observations_cover_all_agents() {
        let mut engine = MockEngine::new(2);
        engine.start_session(&setup_for(3, false)).unwrap();
        engine.new_episode().unwrap();

        let states = engine.state_all().unwrap();
        assert_eq!(states.len(), 3);
        // Each agent sees the other two.
        assert!(states.values().all(|s| s.enemy_states.len() == 2));
    }

    #[test]
    fn test_depth_map_follows_setup_toggle() {
        let mut engine = MockEngine::new(1).with_depth_shape(4, 8);
        engine.start_session(&setup_for(1, true)).unwrap();
        engine.new_episode().unwrap();

        let states = engine.state_all().unwrap();
        let depth = states[&0].depth_map.as_ref().unwrap();
        assert_eq!(depth.shape(), (4, 8));

        let mut engine = MockEngine::new(1);
        engine.start_session(&setup_for(1, false)).unwrap();
        engine.new_episode().unwrap();
        assert!(engine.state_all().unwrap()[&0].depth_map.is_none());
    }

    #[test]
    fn test_calls_without_session_are_engine_errors() {
        let mut engine = MockEngine::new(1);
        assert!(matches!(
            engine.time_step(),
            Err(EngineError::Engine(_))
        ));
    }
}
