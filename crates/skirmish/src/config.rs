//! Session configuration.
//!
//! A `GameConfig` is a flat set of named, typed options describing one run
//! against the engine. It is validated up front and immutable once the
//! session starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::action::ActionVariable;
use crate::state::Position;
use crate::{EngineError, Result};

/// Game mode selected at session setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Navigate to a target location.
    Navigation,
    /// Collect supply items, no combat.
    SupplyGather,
    /// Collect supply items while fighting other agents.
    SupplyBattle,
}

impl GameMode {
    /// Stable id used on the wire when selecting the mode.
    pub fn wire_id(self) -> i32 {
        match self {
            GameMode::Navigation => 0,
            GameMode::SupplyGather => 1,
            GameMode::SupplyBattle => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Navigation => "navigation",
            GameMode::SupplyGather => "supply_gather",
            GameMode::SupplyBattle => "supply_battle",
        }
    }
}

/// Placement rules for supply items across the map.
///
/// Richness values are percentages; quantity ranges are inclusive `(lo, hi)`
/// bounds on items per spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRules {
    /// Center of the supply density heatmap on the ground plane (x, z).
    pub heatmap_center: [f32; 2],
    pub heatmap_radius: f32,
    pub indoor_richness: u32,
    pub outdoor_richness: u32,
    pub indoor_quantity: (u32, u32),
    pub outdoor_quantity: (u32, u32),
    /// Minimum distance between neighbouring supply spawn points.
    pub spacing: u32,
}

impl Default for SupplyRules {
    fn default() -> Self {
        Self {
            heatmap_center: [0.0, 0.0],
            heatmap_radius: 50.0,
            indoor_richness: 80,
            outdoor_richness: 20,
            indoor_quantity: (10, 50),
            outdoor_quantity: (1, 5),
            spacing: 5,
        }
    }
}

/// Session configuration for a run against the engine.
///
/// Defaults mirror the engine client's stock settings: a single agent in
/// supply-battle mode on map 1, reachable at `127.0.0.1:50051`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Engine host.
    pub host: String,
    /// Engine gRPC port.
    pub port: u16,
    /// Upper bound on connection establishment and handshake.
    pub connect_timeout: Duration,
    /// Upper bound on a single episode, also registered with the engine.
    pub episode_timeout: Duration,
    pub map_id: u32,
    pub random_seed: u64,
    pub num_episodes: u32,
    pub num_agents: u32,
    pub game_mode: GameMode,
    /// Capture per-agent depth buffers alongside regular observations.
    pub use_depth_map: bool,
    /// Ask the engine to record replays for each episode.
    pub record: bool,
    /// Prefix for per-episode replay labels.
    pub replay_suffix: String,
    /// Spawn pose of agent 0. Further agents spawn at random locations.
    pub start_location: Position,
    /// Movement speed passed through to the built-in random policy.
    pub walk_speed: f32,
    /// Action dimensions registered with the engine, in submission order.
    pub available_actions: SmallVec<[ActionVariable; 8]>,
    pub supply: SupplyRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50051,
            connect_timeout: Duration::from_secs(10),
            episode_timeout: Duration::from_secs(10),
            map_id: 1,
            random_seed: 0,
            num_episodes: 1,
            num_agents: 1,
            game_mode: GameMode::SupplyBattle,
            use_depth_map: false,
            record: false,
            replay_suffix: String::new(),
            start_location: Position::default(),
            walk_speed: 1.0,
            available_actions: SmallVec::from_slice(&ActionVariable::ALL),
            supply: SupplyRules::default(),
        }
    }
}

impl GameConfig {
    /// Check every field for missing or out-of-range values.
    ///
    /// Returns the first problem found. The runner calls this before any
    /// engine traffic, so an invalid configuration never reaches
    /// `start_session`.
    pub fn validate(&self) -> Result<()> {
        fn fail<T>(field: &'static str, reason: impl Into<String>) -> Result<T> {
            Err(EngineError::Config {
                field,
                reason: reason.into(),
            })
        }

        if self.host.is_empty() {
            return fail("host", "must not be empty");
        }
        if self.port == 0 {
            return fail("port", "must be nonzero");
        }
        if self.connect_timeout.is_zero() {
            return fail("connect_timeout", "must be positive");
        }
        if self.episode_timeout.is_zero() {
            return fail("episode_timeout", "must be positive");
        }
        if self.num_episodes == 0 {
            return fail("num_episodes", "must be at least 1");
        }
        if self.num_agents == 0 {
            return fail("num_agents", "must be at least 1");
        }
        if !self.walk_speed.is_finite() || self.walk_speed <= 0.0 {
            return fail("walk_speed", format!("must be positive, got {}", self.walk_speed));
        }
        if !self.start_location.is_finite() {
            return fail("start_location", "coordinates must be finite");
        }
        if self.available_actions.is_empty() {
            return fail("available_actions", "at least one action dimension is required");
        }
        for (i, var) in self.available_actions.iter().enumerate() {
            if self.available_actions[..i].contains(var) {
                return fail("available_actions", format!("duplicate dimension {var}"));
            }
        }

        let supply = &self.supply;
        if !supply.heatmap_center.iter().all(|c| c.is_finite()) {
            return fail("supply.heatmap_center", "coordinates must be finite");
        }
        if !supply.heatmap_radius.is_finite() || supply.heatmap_radius <= 0.0 {
            return fail("supply.heatmap_radius", "must be positive");
        }
        if supply.indoor_richness > 100 {
            return fail("supply.indoor_richness", "percentage above 100");
        }
        if supply.outdoor_richness > 100 {
            return fail("supply.outdoor_richness", "percentage above 100");
        }
        for (field, range) in [
            ("supply.indoor_quantity", supply.indoor_quantity),
            ("supply.outdoor_quantity", supply.outdoor_quantity),
        ] {
            if range.0 == 0 {
                return fail(field, "lower bound must be at least 1");
            }
            if range.0 > range.1 {
                return fail(field, format!("inverted range {}..{}", range.0, range.1));
            }
        }
        if supply.spacing == 0 {
            return fail("supply.spacing", "must be at least 1");
        }

        Ok(())
    }

    /// Engine endpoint as `host:port`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: EngineError) -> &'static str {
        match err {
            EngineError::Config { field, .. } => field,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_agents() {
        let config = GameConfig {
            num_agents: 0,
            ..GameConfig::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "num_agents");
    }

    #[test]
    fn test_rejects_zero_episodes() {
        let config = GameConfig {
            num_episodes: 0,
            ..GameConfig::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "num_episodes");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = GameConfig {
            episode_timeout: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "episode_timeout");
    }

    #[test]
    fn test_rejects_bad_walk_speed() {
        for bad in [0.0, -1.0, f32::NAN] {
            let config = GameConfig {
                walk_speed: bad,
                ..GameConfig::default()
            };
            assert_eq!(field_of(config.validate().unwrap_err()), "walk_speed");
        }
    }

    #[test]
    fn test_rejects_duplicate_action_dimensions() {
        let mut config = GameConfig::default();
        config.available_actions.push(ActionVariable::Jump);
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "available_actions"
        );
    }

    #[test]
    fn test_rejects_empty_action_set() {
        let config = GameConfig {
            available_actions: SmallVec::new(),
            ..GameConfig::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "available_actions"
        );
    }

    #[test]
    fn test_rejects_bad_supply_rules() {
        let mut config = GameConfig::default();
        config.supply.indoor_richness = 101;
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "supply.indoor_richness"
        );

        let mut config = GameConfig::default();
        config.supply.outdoor_quantity = (6, 2);
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "supply.outdoor_quantity"
        );

        let mut config = GameConfig::default();
        config.supply.spacing = 0;
        assert_eq!(field_of(config.validate().unwrap_err()), "supply.spacing");
    }

    #[test]
    fn test_endpoint_format() {
        let config = GameConfig::default();
        assert_eq!(config.endpoint(), "127.0.0.1:50051");
    }
}
