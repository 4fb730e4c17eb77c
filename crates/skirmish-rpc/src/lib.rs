//! Tonic-based engine transport for skirmish.
//!
//! `GrpcTransport` puts a blocking facade over the engine's gRPC surface:
//! it owns a current-thread tokio runtime and turns every
//! [`EngineTransport`] call into one `block_on` round-trip, so the episode
//! loop above it stays synchronous.

mod client;
pub mod wire;

pub use client::EngineClient;

use std::collections::HashMap;
use std::time::Duration;

use smallvec::SmallVec;
use tonic::transport::Endpoint;
use tonic::Code;

use skirmish::action::{Action, ActionVariable};
use skirmish::config::GameConfig;
use skirmish::state::{AgentId, AgentState, DepthMap, EnemyInfo, Position, SupplyInfo};
use skirmish::transport::{EngineTransport, SessionSetup, SpawnPoint};
use skirmish::{EngineError, Result};

/// Engine transport over a gRPC channel.
///
/// The channel is established lazily inside `start_session`, so an
/// unreachable engine surfaces there as a connection error, before any
/// episode begins.
pub struct GrpcTransport {
    endpoint: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    rt: tokio::runtime::Runtime,
    client: Option<EngineClient>,
    registered_actions: SmallVec<[ActionVariable; 8]>,
}

impl GrpcTransport {
    /// Prepare a transport for the configured endpoint. No traffic happens
    /// until `start_session`.
    pub fn new(config: &GameConfig) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            endpoint: format!("http://{}", config.endpoint()),
            connect_timeout: config.connect_timeout,
            request_timeout: config.episode_timeout,
            rt,
            client: None,
            registered_actions: SmallVec::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn connection_error(&self, message: impl ToString) -> EngineError {
        EngineError::Connection {
            endpoint: self.endpoint.clone(),
            message: message.to_string(),
        }
    }
}

/// Map a gRPC status onto the client's error taxonomy. Statuses the engine
/// raises about the request itself pass through as engine errors; everything
/// else is a transport failure.
fn map_status(call: &'static str, status: tonic::Status) -> EngineError {
    match status.code() {
        Code::Internal | Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            EngineError::Engine(status.message().to_string())
        }
        _ => EngineError::Transport {
            call,
            message: status.to_string(),
        },
    }
}

fn wire_position(position: Position) -> wire::Vector3 {
    wire::Vector3 {
        x: position.x,
        y: position.y,
        z: position.z,
    }
}

fn position_from_wire(position: Option<wire::Vector3>) -> Position {
    position
        .map(|v| Position::new(v.x, v.y, v.z))
        .unwrap_or_default()
}

fn session_request(setup: &SessionSetup) -> wire::SessionRequest {
    let supply = &setup.supply;
    wire::SessionRequest {
        game_mode: setup.game_mode.wire_id(),
        map_id: setup.map_id,
        random_seed: setup.random_seed,
        episode_timeout_s: setup.episode_timeout.as_secs().try_into().unwrap_or(u32::MAX),
        spawns: setup
            .spawns
            .iter()
            .enumerate()
            .map(|(agent_id, spawn)| match spawn {
                SpawnPoint::Fixed(position) => wire::AgentSpawn {
                    agent_id: agent_id as u32,
                    random: false,
                    position: Some(wire_position(*position)),
                },
                SpawnPoint::Random => wire::AgentSpawn {
                    agent_id: agent_id as u32,
                    random: true,
                    position: None,
                },
            })
            .collect(),
        actions: setup
            .available_actions
            .iter()
            .map(|v| v.wire_id())
            .collect(),
        depth_map: setup.use_depth_map,
        record: setup.record,
        supply: Some(wire::SupplyRulesMsg {
            heatmap_center_x: supply.heatmap_center[0],
            heatmap_center_z: supply.heatmap_center[1],
            heatmap_radius: supply.heatmap_radius,
            indoor_richness: supply.indoor_richness,
            outdoor_richness: supply.outdoor_richness,
            indoor_quantity_min: supply.indoor_quantity.0,
            indoor_quantity_max: supply.indoor_quantity.1,
            outdoor_quantity_min: supply.outdoor_quantity.0,
            outdoor_quantity_max: supply.outdoor_quantity.1,
            spacing: supply.spacing,
        }),
    }
}

fn state_from_wire(msg: wire::AgentStateMsg) -> Result<(AgentId, AgentState)> {
    let depth_map = match msg.depth_map {
        Some(depth) => Some(
            DepthMap::from_raw(depth.rows as usize, depth.cols as usize, depth.values).ok_or(
                EngineError::Transport {
                    call: "state_all",
                    message: format!("depth buffer size mismatch for agent {}", msg.agent_id),
                },
            )?,
        ),
        None => None,
    };

    let state = AgentState {
        position: position_from_wire(msg.position),
        pitch: msg.pitch,
        yaw: msg.yaw,
        health: msg.health,
        weapon_ammo: msg.weapon_ammo,
        spare_ammo: msg.spare_ammo,
        supply_states: msg
            .supplies
            .into_iter()
            .map(|s| SupplyInfo {
                id: s.id,
                position: position_from_wire(s.position),
                quantity: s.quantity,
            })
            .collect(),
        enemy_states: msg
            .enemies
            .into_iter()
            .map(|e| EnemyInfo {
                id: e.id,
                position: position_from_wire(e.position),
                health: e.health,
            })
            .collect(),
        depth_map,
    };
    Ok((msg.agent_id, state))
}

fn action_request(
    actions: &HashMap<AgentId, Action>,
    variables: &[ActionVariable],
) -> wire::ActionRequest {
    let mut encoded: Vec<wire::AgentActionMsg> = actions
        .iter()
        .map(|(&agent_id, action)| wire::AgentActionMsg {
            agent_id,
            values: action.encode(variables),
        })
        .collect();
    encoded.sort_unstable_by_key(|m| m.agent_id);
    wire::ActionRequest { actions: encoded }
}

impl EngineTransport for GrpcTransport {
    fn start_session(&mut self, setup: &SessionSetup) -> Result<()> {
        let endpoint = Endpoint::from_shared(self.endpoint.clone())
            .map_err(|err| self.connection_error(err))?
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout);

        let mut client = self
            .rt
            .block_on(EngineClient::connect(endpoint))
            .map_err(|err| self.connection_error(err))?;

        self.rt
            .block_on(client.start_session(session_request(setup)))
            .map_err(|status| match status.code() {
                // Handshake failures are connection-class, not mid-run
                // transport errors.
                Code::Unavailable | Code::DeadlineExceeded => self.connection_error(&status),
                _ => map_status("start_session", status),
            })?;

        self.registered_actions = setup.available_actions.clone();
        self.client = Some(client);
        Ok(())
    }

    fn set_replay_label(&mut self, label: &str) -> Result<()> {
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        rt.block_on(client.set_replay_label(wire::ReplayLabelRequest {
            label: label.to_string(),
        }))
        .map_err(|status| map_status("set_replay_label", status))?;
        Ok(())
    }

    fn new_episode(&mut self) -> Result<()> {
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        rt.block_on(client.new_episode(wire::EpisodeRequest {}))
            .map_err(|status| map_status("new_episode", status))?;
        Ok(())
    }

    fn episode_finished(&mut self) -> Result<bool> {
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        let reply = rt
            .block_on(client.episode_finished(wire::FinishedRequest {}))
            .map_err(|status| map_status("episode_finished", status))?;
        Ok(reply.finished)
    }

    fn time_step(&mut self) -> Result<u32> {
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        let reply = rt
            .block_on(client.time_step(wire::TimeStepRequest {}))
            .map_err(|status| map_status("time_step", status))?;
        Ok(reply.time_step)
    }

    fn state_all(&mut self) -> Result<HashMap<AgentId, AgentState>> {
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        let reply = rt
            .block_on(client.state_all(wire::StateRequest {}))
            .map_err(|status| map_status("state_all", status))?;
        reply.states.into_iter().map(state_from_wire).collect()
    }

    fn submit_actions(&mut self, actions: &HashMap<AgentId, Action>) -> Result<()> {
        let request = action_request(actions, &self.registered_actions);
        let Self { rt, client, .. } = self;
        let client = client.as_mut().ok_or(EngineError::NotConnected)?;
        rt.block_on(client.submit_actions(request))
            .map_err(|status| map_status("submit_actions", status))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Self { rt, client, .. } = self;
        let Some(active) = client.as_mut() else {
            return Ok(());
        };
        let result = rt
            .block_on(active.close(wire::CloseRequest {}))
            .map_err(|status| map_status("close", status));
        *client = None;
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish::config::{GameMode, SupplyRules};
    use std::time::Duration;

    fn setup() -> SessionSetup {
        SessionSetup::from_config(&GameConfig {
            num_agents: 2,
            map_id: 4,
            random_seed: 99,
            game_mode: GameMode::SupplyBattle,
            use_depth_map: true,
            record: true,
            start_location: Position::new(1.0, 2.0, 3.0),
            supply: SupplyRules {
                heatmap_center: [1.0, 3.0],
                ..SupplyRules::default()
            },
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_session_request_carries_full_handshake() {
        let request = session_request(&setup());

        assert_eq!(request.game_mode, GameMode::SupplyBattle.wire_id());
        assert_eq!(request.map_id, 4);
        assert_eq!(request.random_seed, 99);
        assert_eq!(request.episode_timeout_s, 10);
        assert!(request.depth_map);
        assert!(request.record);

        assert_eq!(request.spawns.len(), 2);
        assert!(!request.spawns[0].random);
        assert_eq!(
            request.spawns[0].position,
            Some(wire::Vector3 {
                x: 1.0,
                y: 2.0,
                z: 3.0
            })
        );
        assert!(request.spawns[1].random);
        assert_eq!(request.spawns[1].position, None);

        // All eight dimensions registered in canonical order.
        assert_eq!(request.actions, (0..8).collect::<Vec<i32>>());

        let supply = request.supply.unwrap();
        assert_eq!(supply.heatmap_center_x, 1.0);
        assert_eq!(supply.heatmap_center_z, 3.0);
        assert_eq!(supply.indoor_quantity_min, 10);
        assert_eq!(supply.indoor_quantity_max, 50);
    }

    #[test]
    fn test_state_from_wire_with_depth_buffer() {
        let msg = wire::AgentStateMsg {
            agent_id: 1,
            position: Some(wire::Vector3 {
                x: 5.0,
                y: 0.0,
                z: -2.0,
            }),
            pitch: 0.5,
            yaw: 90.0,
            health: 80.0,
            weapon_ammo: 3,
            spare_ammo: 12,
            supplies: vec![wire::SupplyMsg {
                id: 7,
                position: None,
                quantity: 2,
            }],
            enemies: vec![],
            depth_map: Some(wire::DepthMapMsg {
                rows: 2,
                cols: 2,
                values: vec![0.1, 0.2, 0.3, 0.4],
            }),
        };

        let (agent_id, state) = state_from_wire(msg).unwrap();
        assert_eq!(agent_id, 1);
        assert_eq!(state.position, Position::new(5.0, 0.0, -2.0));
        assert_eq!(state.weapon_ammo, 3);
        assert_eq!(state.supply_states.len(), 1);
        assert_eq!(state.depth_map.unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_state_from_wire_rejects_malformed_depth_buffer() {
        let msg = wire::AgentStateMsg {
            agent_id: 0,
            depth_map: Some(wire::DepthMapMsg {
                rows: 4,
                cols: 4,
                values: vec![0.0; 3],
            }),
            ..wire::AgentStateMsg::default()
        };
        assert!(matches!(
            state_from_wire(msg),
            Err(EngineError::Transport { call: "state_all", .. })
        ));
    }

    #[test]
    fn test_action_request_sorted_and_encoded() {
        let mut actions = HashMap::new();
        actions.insert(
            2,
            Action {
                walk_dir: 180.0,
                walk_speed: 1.0,
                pickup: true,
                ..Action::default()
            },
        );
        actions.insert(0, Action::default());

        let variables = [ActionVariable::WalkDir, ActionVariable::Pickup];
        let request = action_request(&actions, &variables);

        assert_eq!(request.actions.len(), 2);
        assert_eq!(request.actions[0].agent_id, 0);
        assert_eq!(request.actions[1].agent_id, 2);
        assert_eq!(request.actions[1].values, vec![180.0, 1.0]);
    }

    #[test]
    fn test_unreachable_engine_is_a_connection_error() {
        let config = GameConfig {
            port: 1,
            connect_timeout: Duration::from_secs(1),
            ..GameConfig::default()
        };
        let mut transport = GrpcTransport::new(&config).unwrap();
        let err = transport
            .start_session(&SessionSetup::from_config(&config))
            .unwrap_err();
        assert!(matches!(err, EngineError::Connection { .. }));

        // Calls without an established session are rejected locally.
        assert!(matches!(
            transport.time_step(),
            Err(EngineError::NotConnected)
        ));
        // Teardown before a session is a no-op.
        transport.close().unwrap();
    }
}
