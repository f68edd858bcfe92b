//! Self-play match driver.
//!
//! The driver keeps one search tree for the whole game and advances through
//! it one decision at a time, so MCTS statistics below the played line carry
//! over between moves.

use log::info;

use crate::mcts::{NodeId, Tree};
use crate::rules::winner;
use crate::state::{BoardState, Player};
use crate::strategy::{Strategy, select_move};

/// Outcome of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Player,
    pub plies: usize,
    pub final_state: BoardState,
}

/// A game between two strategies played on one shared search tree.
pub struct Match {
    tree: Tree,
    current: NodeId,
    strategies: [Strategy; 2],
    history: Vec<NodeId>,
    max_plies: Option<usize>,
}

impl Match {
    pub fn new(state: BoardState, player1: Strategy, player2: Strategy) -> Self {
        let tree = Tree::new(state);
        let current = tree.root();
        Self {
            tree,
            current,
            strategies: [player1, player2],
            history: vec![current],
            max_plies: None,
        }
    }

    /// Stop the match after `plies` moves even if moves remain.
    pub fn with_max_plies(mut self, plies: usize) -> Self {
        self.max_plies = Some(plies);
        self
    }

    pub fn strategy_for(&self, player: Player) -> Strategy {
        match player {
            Player::One => self.strategies[0],
            Player::Two => self.strategies[1],
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Nodes visited so far, starting with the opening position.
    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    pub fn plies(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_over(&self) -> bool {
        let node = self.tree.node(self.current);
        (node.is_expanded() && !node.has_children())
            || self.max_plies.is_some_and(|m| self.plies() >= m)
    }

    /// Make one decision for the side to move. Returns the new current
    /// node, or `None` once the game is over.
    pub fn step(&mut self, rng: &mut fastrand::Rng) -> Option<NodeId> {
        if self.max_plies.is_some_and(|m| self.plies() >= m) {
            return None;
        }
        let player = self.tree.node(self.current).state().player;
        let strategy = self.strategy_for(player);
        let next = select_move(strategy, &mut self.tree, self.current, rng)?;
        self.tree.dump_children(self.current);
        self.current = next;
        self.history.push(next);
        Some(next)
    }

    /// Play until no move is available.
    pub fn play(&mut self, rng: &mut fastrand::Rng) -> MatchResult {
        info!(
            "match start: player 1 {}, player 2 {}",
            self.strategies[0], self.strategies[1]
        );
        while self.step(rng).is_some() {}
        let result = self.result();
        info!(
            "match over after {} plies: player {} wins ({})",
            result.plies, result.winner, result.final_state
        );
        result
    }

    pub fn result(&self) -> MatchResult {
        let final_state = *self.tree.node(self.current).state();
        MatchResult {
            winner: winner(&final_state),
            plies: self.plies(),
            final_state,
        }
    }
}
