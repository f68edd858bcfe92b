//! Simulated playouts used to sample a result for MCTS leaves.
//!
//! A playout applies moves from a fast policy until the side to move has no
//! legal move, then names the winner by comparing army sizes.

use log::trace;

use crate::constants::MAX_ROLLOUT_PLIES;
use crate::rules::winner;
use crate::state::{BoardState, Player};
use crate::strategy::{random_move, utility_move};

/// Move policy for a playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RolloutPolicy {
    Random,
    Utility,
}

impl RolloutPolicy {
    /// Alternate policies by the leaf's visit count: random on even, greedy on odd.
    #[inline]
    pub fn for_visits(visits: u32) -> Self {
        if visits % 2 == 0 {
            RolloutPolicy::Random
        } else {
            RolloutPolicy::Utility
        }
    }
}

/// Play `state` out with `policy`, returning the final position and the
/// number of plies played.
///
/// Stops after `MAX_ROLLOUT_PLIES` even if moves remain.
pub fn play_out(
    state: &BoardState,
    policy: RolloutPolicy,
    rng: &mut fastrand::Rng,
) -> (BoardState, usize) {
    let mut current = *state;
    for plies in 0..MAX_ROLLOUT_PLIES {
        let next = match policy {
            RolloutPolicy::Random => random_move(&current, rng),
            RolloutPolicy::Utility => utility_move(&current, rng),
        };
        match next {
            Some(s) => current = s,
            None => return (current, plies),
        }
    }
    trace!("rollout stopped at ply cap with {current}");
    (current, MAX_ROLLOUT_PLIES)
}

/// Winner of a playout from `state`.
pub fn rollout(state: &BoardState, policy: RolloutPolicy, rng: &mut fastrand::Rng) -> Player {
    let (end, _) = play_out(state, policy, rng);
    winner(&end)
}
