//! Move-selection strategies.
//!
//! Every strategy answers the same question: given a position, which
//! successor to play. `None` means the side to move has no legal move.
//!
//! - [`Strategy::Random`] picks uniformly among successors.
//! - [`Strategy::Utility`] maximises the one-ply heuristic, breaking ties at random.
//! - [`Strategy::Negamax`] searches a fixed depth with the heuristic at the leaves.
//! - [`Strategy::ParallelNegamax`] is the same search with the first ply fanned
//!   out over the rayon pool.
//! - [`Strategy::Mcts`] runs UCT tree search (see [`crate::mcts`]).

use std::fmt;

use rayon::prelude::*;

use crate::constants::{EVALUATOR_FLOOR, NEGAMAX_FLOOR};
use crate::eval::score_player;
use crate::mcts::{NodeId, Tree};
use crate::rules::generate_successors;
use crate::state::BoardState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Utility,
    Negamax { depth: u32 },
    ParallelNegamax { depth: u32 },
    Mcts { iterations: usize },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::Utility => write!(f, "utility"),
            Strategy::Negamax { depth } => write!(f, "negamax(depth {depth})"),
            Strategy::ParallelNegamax { depth } => write!(f, "parallel-negamax(depth {depth})"),
            Strategy::Mcts { iterations } => write!(f, "mcts({iterations} iterations)"),
        }
    }
}

/// Pick the move for `node` with `strategy`, expanding the node as needed.
///
/// Returns the chosen child, or `None` if the position is terminal. Tree
/// statistics gathered by MCTS stay in `tree`, so a driver can keep searching
/// from the returned child on the next turn.
pub fn select_move(
    strategy: Strategy,
    tree: &mut Tree,
    node: NodeId,
    rng: &mut fastrand::Rng,
) -> Option<NodeId> {
    match strategy {
        Strategy::Random => {
            let children = tree.expand(node);
            if children.is_empty() {
                return None;
            }
            Some(children[rng.usize(..children.len())])
        }
        Strategy::Utility => {
            let children = tree.expand(node).to_vec();
            let player = tree.node(node).state().player;
            argmax_tie(
                children
                    .iter()
                    .map(|&c| score_player(tree.node(c).state(), player)),
                rng,
            )
            .map(|i| children[i])
        }
        Strategy::Negamax { depth } => {
            let (children, states) = child_states(tree, node);
            let state = *tree.node(node).state();
            negamax_index(&state, &states, depth).0.map(|i| children[i])
        }
        Strategy::ParallelNegamax { depth } => {
            let (children, states) = child_states(tree, node);
            parallel_negamax_index(&states, depth).0.map(|i| children[i])
        }
        Strategy::Mcts { iterations } => tree.search(node, iterations, rng),
    }
}

/// Pick a successor of `state` with `strategy` on a fresh search tree.
pub fn choose_move(
    strategy: Strategy,
    state: &BoardState,
    rng: &mut fastrand::Rng,
) -> Option<BoardState> {
    let mut tree = Tree::new(*state);
    let root = tree.root();
    select_move(strategy, &mut tree, root, rng).map(|id| *tree.node(id).state())
}

fn child_states(tree: &mut Tree, node: NodeId) -> (Vec<NodeId>, Vec<BoardState>) {
    let children = tree.expand(node).to_vec();
    let states = children.iter().map(|&c| *tree.node(c).state()).collect();
    (children, states)
}

// =============================================================================
// Random and greedy
// =============================================================================

/// A uniformly random successor.
pub fn random_move(state: &BoardState, rng: &mut fastrand::Rng) -> Option<BoardState> {
    let successors = generate_successors(state);
    if successors.is_empty() {
        return None;
    }
    Some(successors[rng.usize(..successors.len())])
}

/// The successor with the best heuristic score for the mover.
///
/// Ties are broken uniformly at random.
pub fn utility_move(state: &BoardState, rng: &mut fastrand::Rng) -> Option<BoardState> {
    let successors = generate_successors(state);
    argmax_tie(
        successors.iter().map(|s| score_player(s, state.player)),
        rng,
    )
    .map(|i| successors[i])
}

/// Index of the maximum score, replacing the held winner on the k-th tie
/// with probability 1/k.
fn argmax_tie(scores: impl Iterator<Item = i32>, rng: &mut fastrand::Rng) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    let mut ties = 0;
    for (i, s) in scores.enumerate() {
        match best.map(|(_, b)| b) {
            Some(b) if s < b => {}
            Some(b) if s == b => {
                ties += 1;
                if rng.usize(..ties) == 0 {
                    best = Some((i, s));
                }
            }
            _ => {
                best = Some((i, s));
                ties = 1;
            }
        }
    }
    best.map(|(i, _)| i)
}

// =============================================================================
// Negamax
// =============================================================================

/// Depth-limited negamax. Returns the chosen successor and its score from
/// the mover's perspective.
///
/// At depth 0 successors are scored by the heuristic and the first maximum
/// wins. Above that, each successor is searched one level shallower from the
/// opponent's side and the last maximum wins.
pub fn negamax(state: &BoardState, depth: u32) -> (Option<BoardState>, i32) {
    let successors = generate_successors(state);
    let (best, score) = negamax_index(state, &successors, depth);
    (best.map(|i| successors[i]), score)
}

/// [`negamax`] with the first ply evaluated concurrently.
///
/// Only the top level fans out; each task runs the sequential search one
/// level shallower. The reduction runs over the collected scores in
/// successor order, so for `depth >= 1` the result matches [`negamax`]
/// exactly. The first ply always fans out, which makes depth 0 search the
/// opponent's one-ply replies like depth 1.
pub fn parallel_negamax(state: &BoardState, depth: u32) -> (Option<BoardState>, i32) {
    let successors = generate_successors(state);
    let (best, score) = parallel_negamax_index(&successors, depth);
    (best.map(|i| successors[i]), score)
}

fn negamax_score(state: &BoardState, depth: u32) -> i32 {
    let successors = generate_successors(state);
    negamax_index(state, &successors, depth).1
}

fn negamax_index(
    state: &BoardState,
    successors: &[BoardState],
    depth: u32,
) -> (Option<usize>, i32) {
    if depth == 0 {
        return evaluate_index(state, successors);
    }
    best_negated(successors.iter().map(|next| negamax_score(next, depth - 1)))
}

fn parallel_negamax_index(successors: &[BoardState], depth: u32) -> (Option<usize>, i32) {
    let depth = depth.saturating_sub(1);
    let scores: Vec<i32> = successors
        .par_iter()
        .map(|next| negamax_score(next, depth))
        .collect();
    best_negated(scores.into_iter())
}

/// One-ply evaluation; the first maximum wins.
fn evaluate_index(state: &BoardState, successors: &[BoardState]) -> (Option<usize>, i32) {
    let mut best = None;
    let mut best_score = EVALUATOR_FLOOR;
    for (i, next) in successors.iter().enumerate() {
        let score = score_player(next, state.player);
        if score > best_score {
            best_score = score;
            best = Some(i);
        }
    }
    (best, best_score)
}

/// Negate the opponent's scores and keep the last maximum.
fn best_negated(enemy_scores: impl Iterator<Item = i32>) -> (Option<usize>, i32) {
    let mut best = None;
    let mut best_score = NEGAMAX_FLOOR;
    for (i, enemy) in enemy_scores.enumerate() {
        let score = -enemy;
        if score >= best_score {
            best_score = score;
            best = Some(i);
        }
    }
    (best, best_score)
}
