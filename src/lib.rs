//! Onitama-Rust: a rules engine and search engine for Onitama.
//!
//! Two armies of five pieces face each other on a 5x5 board. Moves are
//! governed by a pool of five cards: each side holds two, one floats, and a
//! used card is swapped for the floating one. A side wins by capturing the
//! enemy master or by walking its own master onto the enemy's shrine.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scoring weights, search parameters
//! - [`vector`] - 2D integer vector for cells and offsets
//! - [`card`] - Move cards and the standard deck
//! - [`army`] - One side's pieces and cards
//! - [`state`] - Board state, players, opening position
//! - [`rules`] - Successor generation and outcome
//! - [`eval`] - Static heuristic evaluation
//! - [`strategy`] - Random, greedy, negamax and MCTS move selection
//! - [`playout`] - Rollouts for MCTS
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`game`] - Self-play match driver
//! - [`export`] - CSV and Graphviz dumps
//!
//! ## Example
//!
//! ```
//! use onitama_rust::card::{BOAR, CRAB, MONKEY, OX, TIGER};
//! use onitama_rust::mcts::Tree;
//! use onitama_rust::state::create_initial_state;
//!
//! let state = create_initial_state([TIGER, CRAB], [MONKEY, OX], BOAR).unwrap();
//! let mut tree = Tree::new(state);
//! let root = tree.root();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let best = tree.search(root, 100, &mut rng).unwrap();
//! println!("Best move: {}", tree.node(best).state());
//! ```

pub mod army;
pub mod card;
pub mod constants;
pub mod error;
pub mod eval;
pub mod export;
pub mod game;
pub mod mcts;
pub mod playout;
pub mod rules;
pub mod state;
pub mod strategy;
pub mod vector;
