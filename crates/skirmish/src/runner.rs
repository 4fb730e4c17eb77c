//! The episodic control loop.
//!
//! `EpisodeRunner` owns the transport exclusively for a run's duration and
//! drives it single-threaded: each step blocks on the engine's response
//! before the next action is computed. There is no retry and no
//! partial-failure recovery; the first transport error aborts the run and
//! propagates to the caller.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::policy::Policy;
use crate::state::{AgentId, DepthMap};
use crate::telemetry::{EpisodeSummary, NoOpSink, StepRecord, StepSink};
use crate::transport::{EngineTransport, SessionSetup};
use crate::utils::step_rate;
use crate::{EngineError, Result};

/// Lifecycle of the session handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Configured,
    Connected,
    Closed,
}

/// Lifecycle of a single episode.
///
/// `Running -> Finished` is triggered exclusively by the engine's
/// completion signal; the only other exit is `Aborted` via an unrecoverable
/// transport or timeout error, which propagates out of [`EpisodeRunner::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    Idle,
    Running,
    Finished,
    Aborted,
}

/// Totals for a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub episodes: u32,
    pub total_steps: u64,
    pub elapsed: Duration,
}

/// Drives episodes against an engine behind an [`EngineTransport`].
pub struct EpisodeRunner<T: EngineTransport> {
    config: GameConfig,
    transport: T,
    sink: Arc<dyn StepSink>,
    session: SessionState,
    phase: EpisodePhase,
}

impl<T: EngineTransport> std::fmt::Debug for EpisodeRunner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeRunner")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<T: EngineTransport> EpisodeRunner<T> {
    /// Apply the session configuration. Fails without touching the engine
    /// if any option is missing or out of range.
    pub fn new(config: GameConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            sink: Arc::new(NoOpSink),
            session: SessionState::Configured,
            phase: EpisodePhase::Idle,
        })
    }

    /// Attach a telemetry sink. Replaces the default discarding sink.
    pub fn with_sink(mut self, sink: Arc<dyn StepSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The transport, for inspection after a run.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Establish the connection and perform the session handshake.
    ///
    /// Fails with a connection error if the engine is unreachable within
    /// the configured timeout. No telemetry is emitted before this
    /// succeeds.
    pub fn start_session(&mut self) -> Result<()> {
        if self.session != SessionState::Configured {
            return Err(EngineError::NotConnected);
        }
        let setup = SessionSetup::from_config(&self.config);
        self.transport.start_session(&setup)?;
        self.session = SessionState::Connected;
        tracing::info!(
            mode = self.config.game_mode.name(),
            map_id = self.config.map_id,
            agents = self.config.num_agents,
            "session established"
        );
        Ok(())
    }

    /// Run `num_episodes` episodes under `policy`.
    ///
    /// Each episode resets the engine, then repeatedly fetches the joint
    /// observation set, asks the policy for one action per agent, submits
    /// the joint action set atomically, and emits one telemetry record per
    /// agent, until the engine reports completion. Any transport error
    /// aborts the run.
    pub fn run<P: Policy>(&mut self, num_episodes: u32, policy: &mut P) -> Result<RunSummary> {
        if self.session != SessionState::Connected {
            return Err(EngineError::NotConnected);
        }

        let run_started = Instant::now();
        let mut total_steps = 0u64;

        for episode in 0..num_episodes {
            match self.run_episode(episode, policy) {
                Ok(steps) => total_steps += steps,
                Err(err) => {
                    self.phase = EpisodePhase::Aborted;
                    return Err(err);
                }
            }
        }

        Ok(RunSummary {
            episodes: num_episodes,
            total_steps,
            elapsed: run_started.elapsed(),
        })
    }

    fn run_episode<P: Policy>(&mut self, episode: u32, policy: &mut P) -> Result<u64> {
        self.phase = EpisodePhase::Idle;
        let label = format!("{}_episode_{}", self.config.replay_suffix, episode);
        self.transport.set_replay_label(&label)?;
        self.transport.new_episode()?;
        self.phase = EpisodePhase::Running;
        tracing::debug!(episode, "episode started");

        let episode_started = Instant::now();
        let mut steps = 0u64;

        while !self.transport.episode_finished()? {
            if episode_started.elapsed() > self.config.episode_timeout {
                return Err(EngineError::EpisodeTimeout {
                    timeout: self.config.episode_timeout,
                });
            }

            let time_step = self.transport.time_step()?;

            let step_started = Instant::now();
            let states = self.transport.state_all()?;

            // Stable agent order keeps seeded policies reproducible.
            let mut agent_ids: Vec<AgentId> = states.keys().copied().collect();
            agent_ids.sort_unstable();

            let mut actions = HashMap::with_capacity(states.len());
            for &agent_id in &agent_ids {
                actions.insert(agent_id, policy.decide(&states[&agent_id], time_step));
            }
            self.transport.submit_actions(&actions)?;
            let rate = step_rate(step_started.elapsed());

            for &agent_id in &agent_ids {
                let state = &states[&agent_id];
                self.sink.record_step(&StepRecord {
                    episode,
                    time_step,
                    agent_id,
                    location: state.position,
                    action: actions[&agent_id],
                    num_supplies: state.supply_states.len(),
                    num_enemies: state.enemy_states.len(),
                    step_rate: rate,
                    depth_map_shape: state.depth_map.as_ref().map(DepthMap::shape),
                });
            }
            steps += 1;
        }

        self.phase = EpisodePhase::Finished;
        let summary = EpisodeSummary {
            episode,
            steps,
            elapsed: episode_started.elapsed(),
        };
        tracing::debug!(episode, steps, "episode finished");
        self.sink.episode_end(&summary);
        Ok(steps)
    }

    /// Release the session. Idempotent and safe to call after a failed
    /// run; engine teardown errors are logged and swallowed so teardown
    /// can always be attempted.
    pub fn close(&mut self) -> Result<()> {
        if self.session == SessionState::Closed {
            return Ok(());
        }
        self.session = SessionState::Closed;
        if let Err(err) = self.transport.close() {
            tracing::warn!(error = %err, "engine teardown failed");
        }
        Ok(())
    }
}
