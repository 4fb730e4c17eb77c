//! Decision policies.
//!
//! A policy maps an observation and the current time step to an action.
//! The runner never inspects policy internals; deterministic and randomized
//! implementations are both valid.

mod random;

pub use random::RandomPolicy;

use crate::action::Action;
use crate::state::AgentState;

/// Decision function invoked once per agent per time step.
pub trait Policy {
    fn decide(&mut self, state: &AgentState, time_step: u32) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&AgentState, u32) -> Action,
{
    fn decide(&mut self, state: &AgentState, time_step: u32) -> Action {
        self(state, time_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_are_policies() {
        let mut policy = |_state: &AgentState, time_step: u32| Action {
            attack: time_step > 5,
            ..Action::default()
        };
        let state = AgentState::default();
        assert!(!policy.decide(&state, 0).attack);
        assert!(policy.decide(&state, 6).attack);
    }
}
