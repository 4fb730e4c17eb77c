//! # Skirmish
//!
//! Client runtime for driving a remote first-person-shooter game engine
//! through an episodic agent-environment control loop.
//!
//! ## Overview
//!
//! Skirmish provides:
//! - A typed, validated session configuration (`GameConfig`)
//! - The engine boundary as a trait (`EngineTransport`), with a scripted
//!   in-process engine for tests (`MockEngine`)
//! - A pluggable decision contract (`Policy`) plus the built-in
//!   `RandomPolicy`
//! - The `EpisodeRunner` control loop with per-step telemetry sinks
//!
//! The gRPC transport for a real engine lives in the `skirmish-rpc` crate;
//! the command-line driver lives in `skirmish-cli`.
//!
//! ## Quick Start
//!
//! ```rust
//! use skirmish::prelude::*;
//! use skirmish::transport::mock::MockEngine;
//!
//! let config = GameConfig::default();
//! let engine = MockEngine::new(8);
//! let mut runner = EpisodeRunner::new(config.clone(), engine).unwrap();
//! runner.start_session().unwrap();
//!
//! let mut policy = RandomPolicy::from_config(&config);
//! let summary = runner.run(config.num_episodes, &mut policy).unwrap();
//! assert_eq!(summary.episodes, 1);
//! runner.close().unwrap();
//! ```

pub mod action;
pub mod config;
pub mod policy;
pub mod runner;
pub mod state;
pub mod telemetry;
pub mod transport;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionVariable};
    pub use crate::config::{GameConfig, GameMode, SupplyRules};
    pub use crate::policy::{Policy, RandomPolicy};
    pub use crate::runner::{EpisodePhase, EpisodeRunner, RunSummary};
    pub use crate::state::{AgentId, AgentState, DepthMap, EnemyInfo, Position, SupplyInfo};
    pub use crate::telemetry::{
        CompositeSink, ConsoleSink, EpisodeSummary, JsonlSink, MemorySink, NoOpSink, StepRecord,
        StepSink,
    };
    pub use crate::transport::{EngineTransport, SessionSetup, SpawnPoint};
    pub use crate::{EngineError, Result};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid configuration value, detected before the session starts.
    #[error("invalid configuration: {field}: {reason}")]
    Config {
        field: &'static str,
        reason: String,
    },

    /// Engine unreachable or handshake timed out.
    #[error("failed to connect to engine at {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// Communication failure mid-run. Fatal for the current run, never retried.
    #[error("transport error during {call}: {message}")]
    Transport {
        call: &'static str,
        message: String,
    },

    /// Error reported by the engine itself, passed through unmodified.
    #[error("engine error: {0}")]
    Engine(String),

    /// The episode loop exceeded the configured wall-clock bound.
    #[error("episode exceeded the configured timeout of {timeout:?}")]
    EpisodeTimeout { timeout: std::time::Duration },

    /// `run` was called without an established session.
    #[error("session not established")]
    NotConnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
