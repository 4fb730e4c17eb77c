//! Observation data model.
//!
//! Per-agent snapshots produced by the engine each time step and consumed
//! read-only by policies.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Identifier the engine assigns to each agent in the session.
pub type AgentId = u32;

/// A point in the engine's world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A visible supply item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyInfo {
    pub id: u32,
    pub position: Position,
    pub quantity: u32,
}

/// A visible enemy agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInfo {
    pub id: AgentId,
    pub position: Position,
    pub health: f32,
}

/// Dense per-pixel depth buffer captured from the agent's viewpoint.
///
/// Present on observations only when depth sensing was toggled on at
/// session setup.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    data: Array2<f32>,
}

impl DepthMap {
    /// Build a depth map from a row-major buffer. Returns `None` if the
    /// buffer length does not match `rows * cols`.
    pub fn from_raw(rows: usize, cols: usize, values: Vec<f32>) -> Option<Self> {
        Array2::from_shape_vec((rows, cols), values)
            .ok()
            .map(|data| Self { data })
    }

    pub fn shape(&self) -> (usize, usize) {
        let dim = self.data.dim();
        (dim.0, dim.1)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the raw depth values.
    pub fn values(&self) -> &Array2<f32> {
        &self.data
    }
}

/// Per-agent snapshot for a single time step.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Position,
    /// Look direction, degrees.
    pub pitch: f32,
    pub yaw: f32,
    pub health: f32,
    /// Rounds in the equipped weapon's magazine.
    pub weapon_ammo: u32,
    /// Rounds carried outside the magazine.
    pub spare_ammo: u32,
    pub supply_states: Vec<SupplyInfo>,
    pub enemy_states: Vec<EnemyInfo>,
    pub depth_map: Option<DepthMap>,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: Position::default(),
            pitch: 0.0,
            yaw: 0.0,
            health: 100.0,
            weapon_ammo: 0,
            spare_ammo: 0,
            supply_states: Vec::new(),
            enemy_states: Vec::new(),
            depth_map: None,
        }
    }
}
