//! Action data model.
//!
//! An `Action` is the control tuple one agent submits for one time step.
//! The engine only consumes the dimensions registered at session setup, in
//! registration order, so `Action::encode` projects the struct onto an
//! ordered slice of `ActionVariable`s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One controllable dimension of the action tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionVariable {
    /// Movement direction, degrees.
    WalkDir,
    WalkSpeed,
    Jump,
    /// Horizontal turn delta, degrees per step.
    TurnLrDelta,
    /// Vertical look delta, degrees per step.
    LookUdDelta,
    Attack,
    Reload,
    /// Collect supply items within reach.
    Pickup,
}

impl ActionVariable {
    /// Every dimension, in canonical wire order.
    pub const ALL: [ActionVariable; 8] = [
        ActionVariable::WalkDir,
        ActionVariable::WalkSpeed,
        ActionVariable::Jump,
        ActionVariable::TurnLrDelta,
        ActionVariable::LookUdDelta,
        ActionVariable::Attack,
        ActionVariable::Reload,
        ActionVariable::Pickup,
    ];

    /// Stable id used on the wire when registering dimensions.
    pub fn wire_id(self) -> i32 {
        match self {
            ActionVariable::WalkDir => 0,
            ActionVariable::WalkSpeed => 1,
            ActionVariable::Jump => 2,
            ActionVariable::TurnLrDelta => 3,
            ActionVariable::LookUdDelta => 4,
            ActionVariable::Attack => 5,
            ActionVariable::Reload => 6,
            ActionVariable::Pickup => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionVariable::WalkDir => "walk_dir",
            ActionVariable::WalkSpeed => "walk_speed",
            ActionVariable::Jump => "jump",
            ActionVariable::TurnLrDelta => "turn_lr_delta",
            ActionVariable::LookUdDelta => "look_ud_delta",
            ActionVariable::Attack => "attack",
            ActionVariable::Reload => "reload",
            ActionVariable::Pickup => "pickup",
        }
    }
}

impl fmt::Display for ActionVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Control tuple for one agent and one time step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    /// Movement direction, degrees in `[0, 360)`.
    pub walk_dir: f32,
    pub walk_speed: f32,
    pub jump: bool,
    pub turn_lr_delta: f32,
    pub look_ud_delta: f32,
    pub attack: bool,
    pub reload: bool,
    pub pickup: bool,
}

impl Action {
    /// Value of a single dimension, with booleans mapped to `0.0`/`1.0`.
    pub fn component(&self, variable: ActionVariable) -> f32 {
        match variable {
            ActionVariable::WalkDir => self.walk_dir,
            ActionVariable::WalkSpeed => self.walk_speed,
            ActionVariable::Jump => f32::from(u8::from(self.jump)),
            ActionVariable::TurnLrDelta => self.turn_lr_delta,
            ActionVariable::LookUdDelta => self.look_ud_delta,
            ActionVariable::Attack => f32::from(u8::from(self.attack)),
            ActionVariable::Reload => f32::from(u8::from(self.reload)),
            ActionVariable::Pickup => f32::from(u8::from(self.pickup)),
        }
    }

    /// Project onto the registered dimensions, in registration order.
    pub fn encode(&self, variables: &[ActionVariable]) -> Vec<f32> {
        variables.iter().map(|v| self.component(*v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Action {
        Action {
            walk_dir: 90.0,
            walk_speed: 2.5,
            jump: true,
            turn_lr_delta: 1.0,
            look_ud_delta: -0.5,
            attack: false,
            reload: true,
            pickup: true,
        }
    }

    #[test]
    fn test_encode_full_tuple_order() {
        let encoded = sample().encode(&ActionVariable::ALL);
        assert_eq!(encoded, vec![90.0, 2.5, 1.0, 1.0, -0.5, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_encode_respects_registration_order() {
        let encoded = sample().encode(&[ActionVariable::Attack, ActionVariable::WalkDir]);
        assert_eq!(encoded, vec![0.0, 90.0]);
    }

    #[test]
    fn test_wire_ids_match_canonical_order() {
        for (i, var) in ActionVariable::ALL.iter().enumerate() {
            assert_eq!(var.wire_id(), i as i32);
        }
    }
}
