//! Built-in random exploration policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Policy;
use crate::action::Action;
use crate::config::GameConfig;
use crate::state::AgentState;

/// Seeded random walker for supply-battle sessions.
///
/// Walks in a uniformly random direction at a fixed speed while slowly
/// turning, jumps every 60th time step, attacks every 30th, always picks up
/// supplies, and reloads exactly when the magazine is empty but spare
/// rounds remain.
pub struct RandomPolicy {
    rng: StdRng,
    walk_speed: f32,
}

impl RandomPolicy {
    pub fn new(seed: u64, walk_speed: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            walk_speed,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.random_seed, config.walk_speed)
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, state: &AgentState, time_step: u32) -> Action {
        Action {
            walk_dir: self.rng.gen_range(0.0..360.0),
            walk_speed: self.walk_speed,
            jump: time_step % 60 == 0,
            turn_lr_delta: 1.0,
            look_ud_delta: 0.0,
            attack: time_step % 30 == 0,
            reload: state.weapon_ammo == 0 && state.spare_ammo > 0,
            pickup: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_ammo(weapon: u32, spare: u32) -> AgentState {
        AgentState {
            weapon_ammo: weapon,
            spare_ammo: spare,
            ..AgentState::default()
        }
    }

    #[test]
    fn test_reload_on_empty_magazine_with_spare() {
        let mut policy = RandomPolicy::new(0, 1.0);
        assert!(policy.decide(&state_with_ammo(0, 30), 1).reload);
    }

    #[test]
    fn test_no_reload_with_rounds_left_or_no_spare() {
        let mut policy = RandomPolicy::new(0, 1.0);
        assert!(!policy.decide(&state_with_ammo(5, 30), 1).reload);
        assert!(!policy.decide(&state_with_ammo(0, 0), 1).reload);
    }

    #[test]
    fn test_jump_and_attack_cadence() {
        let mut policy = RandomPolicy::new(0, 1.0);
        let state = state_with_ammo(5, 0);

        let at_zero = policy.decide(&state, 0);
        assert!(at_zero.jump);
        assert!(at_zero.attack);

        let at_thirty = policy.decide(&state, 30);
        assert!(!at_thirty.jump);
        assert!(at_thirty.attack);

        let at_sixty = policy.decide(&state, 60);
        assert!(at_sixty.jump);
        assert!(at_sixty.attack);

        let off_cadence = policy.decide(&state, 45);
        assert!(!off_cadence.jump);
        assert!(!off_cadence.attack);
    }

    #[test]
    fn test_walk_dir_in_range_and_seeded() {
        let state = state_with_ammo(5, 0);
        let mut a = RandomPolicy::new(42, 2.0);
        let mut b = RandomPolicy::new(42, 2.0);

        for ts in 0..50 {
            let action_a = a.decide(&state, ts);
            let action_b = b.decide(&state, ts);
            assert!((0.0..360.0).contains(&action_a.walk_dir));
            assert_eq!(action_a.walk_dir, action_b.walk_dir);
            assert_eq!(action_a.walk_speed, 2.0);
            assert!(action_a.pickup);
        }
    }
}
