//! Monte Carlo Tree Search with UCT selection.
//!
//! Each iteration:
//! 1. **Select**: from the root, while the current node is expanded, has
//!    children, and every child has been visited, descend to the child with
//!    the highest UCT score, judged from the current node's side to move.
//! 2. **Expand**: expand the landed-on node and take its first unvisited
//!    child, or the node itself if it has none.
//! 3. **Rollout**: play the leaf out, random on even visit counts and greedy
//!    on odd ones (see [`crate::playout`]).
//! 4. **Backpropagate**: update every node from the leaf up to the root.
//!
//! A node's `win_count` counts playouts won by *its own* side to move. Since
//! a child's side to move is the parent's opponent, `child.win_ratio(parent
//! player)` reads the child's statistics from the parent mover's side.
//!
//! Nodes live in an arena owned by [`Tree`]. Ids are arena indices, so they
//! double as creation-order serials and restart at 0 for every new tree.
//! Parents are referenced by id and never owned.

use std::fmt;

use log::debug;

use crate::constants::UCT_EXPLORATION;
use crate::eval::score_player;
use crate::playout::{RolloutPolicy, rollout};
use crate::rules::generate_successors;
use crate::state::{BoardState, Player};

/// Index of a node in its [`Tree`].
pub type NodeId = usize;

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    state: BoardState,
    /// `None` until expanded; empty once expanded if the position is terminal.
    children: Option<Vec<NodeId>>,
    /// Number of visits
    n: u32,
    /// Visits won by `state.player`
    q: u32,
}

impl Node {
    fn new(id: NodeId, parent: Option<NodeId>, state: BoardState) -> Self {
        Self {
            id,
            parent,
            state,
            children: None,
            n: 0,
            q: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn visit_count(&self) -> u32 {
        self.n
    }

    pub fn win_count(&self) -> u32 {
        self.q
    }

    pub fn loss_count(&self) -> u32 {
        self.n - self.q
    }

    /// Fraction of visits won by `player`. Only meaningful once visited.
    #[inline]
    pub fn win_ratio(&self, player: Player) -> f64 {
        let wins = if player == self.state.player {
            self.q
        } else {
            self.n - self.q
        };
        wins as f64 / self.n as f64
    }

    /// One-ply heuristic for the side that moved into this node.
    pub fn utility(&self) -> i32 {
        score_player(&self.state, self.state.player.opponent())
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn is_visited(&self) -> bool {
        self.n > 0
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn update_stats(&mut self, won: bool) {
        if won {
            self.q += 1;
        }
        self.n += 1;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(q {}, n {}, state {}, utility {})",
            self.q,
            self.n,
            self.state,
            self.utility()
        )
    }
}

/// UCT score of a child with the given win ratio and visit counts.
///
/// Both counts must be at least 1.
#[inline]
pub fn uct(win_ratio: f64, visits: u32, parent_visits: u32) -> f64 {
    win_ratio + UCT_EXPLORATION * ((parent_visits as f64).ln() / visits as f64).sqrt()
}

/// [`uct`] from a raw win count.
pub fn uct_wins(wins: u32, visits: u32, parent_visits: u32) -> f64 {
    uct(wins as f64 / visits as f64, visits, parent_visits)
}

/// Arena-backed search tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// A new tree holding only a root for `state`.
    pub fn new(state: BoardState) -> Self {
        Self {
            nodes: vec![Node::new(0, None, state)],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes created so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id`, empty if not yet expanded.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id].children().unwrap_or(&[])
    }

    /// Create children for every legal successor of `id`. Does nothing if
    /// `id` is already expanded.
    pub fn expand(&mut self, id: NodeId) -> &[NodeId] {
        if self.nodes[id].children.is_none() {
            let successors = generate_successors(&self.nodes[id].state);
            let first = self.nodes.len();
            self.nodes.extend(
                successors
                    .into_iter()
                    .enumerate()
                    .map(|(k, s)| Node::new(first + k, Some(id), s)),
            );
            self.nodes[id].children = Some((first..self.nodes.len()).collect());
        }
        self.children(id)
    }

    pub fn is_fully_visited(&self, id: NodeId) -> bool {
        self.children(id).iter().all(|&c| self.nodes[c].is_visited())
    }

    pub fn first_unvisited_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| !self.nodes[c].is_visited())
    }

    /// Child with the most visits; the first one on ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for &c in self.children(id) {
            let n = self.nodes[c].n;
            if best.is_none_or(|(_, b)| n > b) {
                best = Some((c, n));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Child with the highest UCT score from `id`'s side to move; the first
    /// one on ties. All children must have been visited.
    pub fn best_child_uct(&self, id: NodeId) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let player = parent.state.player;
        let mut best: Option<(NodeId, f64)> = None;
        for &c in self.children(id) {
            let child = &self.nodes[c];
            let score = uct(child.win_ratio(player), child.n, parent.n);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((c, score));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Run `iterations` rounds of MCTS below `root` and return its most
    /// visited child, or `None` if `root` is terminal.
    pub fn search(
        &mut self,
        root: NodeId,
        iterations: usize,
        rng: &mut fastrand::Rng,
    ) -> Option<NodeId> {
        for _ in 0..iterations {
            let leaf = self.traverse(root);
            let policy = RolloutPolicy::for_visits(self.nodes[leaf].n);
            let winner = rollout(&self.nodes[leaf].state, policy, rng);
            self.backpropagate(root, leaf, winner);
        }

        self.expand(root);
        let best = self.most_visited_child(root);
        let r = &self.nodes[root];
        debug!(
            "mcts: {} iterations from node {} (q {}, n {}), {} nodes, best {:?}",
            iterations,
            root,
            r.q,
            r.n,
            self.nodes.len(),
            best
        );
        best
    }

    /// Select and expand: find the node the next rollout starts from.
    pub fn traverse(&mut self, root: NodeId) -> NodeId {
        let mut node = root;
        while let Some(next) = self.descend(node) {
            node = next;
        }
        self.expand(node);
        self.first_unvisited_child(node).unwrap_or(node)
    }

    fn descend(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        if node.is_expanded() && node.has_children() && self.is_fully_visited(id) {
            self.best_child_uct(id)
        } else {
            None
        }
    }

    /// Record a playout won by `winner` on every node from `leaf` up to
    /// and including `root`.
    pub fn backpropagate(&mut self, root: NodeId, leaf: NodeId, winner: Player) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            let won = node.state.player == winner;
            node.update_stats(won);
            if id == root {
                break;
            }
            current = node.parent;
        }
    }

    /// Ids from `id` up to the tree root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.nodes[id].parent;
        while let Some(p) = current {
            path.push(p);
            current = self.nodes[p].parent;
        }
        path
    }

    /// Children of `id` ordered by descending utility.
    pub fn children_by_utility(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by_key(|&c| std::cmp::Reverse(self.nodes[c].utility()));
        children
    }

    /// Children of `id` ordered by descending visit count.
    pub fn children_by_visits(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by_key(|&c| std::cmp::Reverse(self.nodes[c].n));
        children
    }

    /// Log a summary of each child of `id`.
    pub fn dump_children(&self, id: NodeId) {
        let player = self.nodes[id].state.player;
        for c in self.children_by_visits(id) {
            let child = &self.nodes[c];
            let wr = if child.is_visited() {
                child.win_ratio(player)
            } else {
                f64::NAN
            };
            debug!(
                "child {} {} n={} q={} wr={:.3} utility={}",
                c,
                child.state,
                child.n,
                child.q,
                wr,
                child.utility()
            );
        }
    }
}
