//! Integration tests for onitama-rust
//!
//! These exercise the public API end to end: opening positions, move
//! generation invariants, heuristic symmetry, strategy dispatch and MCTS.

use onitama_rust::army::Army;
use onitama_rust::card::{
    BOAR, CRAB, Card, DRAGON, ELEPHANT, MONKEY, OX, ROOSTER, TIGER, standard_deck,
};
use onitama_rust::eval::{score_for_side, score_player};
use onitama_rust::mcts::{Tree, uct};
use onitama_rust::rules::{generate_successors, winner};
use onitama_rust::state::{BoardState, Player, create_initial_state, deal};
use onitama_rust::strategy::{Strategy, choose_move, negamax, parallel_negamax};
use onitama_rust::vector::Vector2i;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn cells(pieces: &[(i32, i32)]) -> Vec<Vector2i> {
    pieces.iter().map(|&(x, y)| Vector2i::new(x, y)).collect()
}

fn army(pieces: &[(i32, i32)], c1: Card, c2: Card) -> Army {
    Army::from_pieces(&cells(pieces), c1, c2).unwrap()
}

fn opening() -> BoardState {
    create_initial_state([TIGER, CRAB], [MONKEY, OX], BOAR).unwrap()
}

/// Player 1's master stands one step below the enemy shrine. Crab's forward
/// step is the only move reaching it; every other move leaves the master
/// within reach of player 2's diagonal Monkey steps.
fn near_win() -> BoardState {
    BoardState::new(
        army(&[(2, 3)], CRAB, TIGER),
        army(&[(2, 4), (0, 4), (1, 4), (3, 4), (4, 4)], MONKEY, ELEPHANT),
        ROOSTER,
        Player::One,
    )
    .unwrap()
}

/// Walk every position reachable within `plies` moves.
fn reachable(state: BoardState, plies: usize) -> Vec<BoardState> {
    let mut frontier = vec![state];
    let mut all = vec![state];
    for _ in 0..plies {
        let next: Vec<BoardState> = frontier.iter().flat_map(generate_successors).collect();
        all.extend(next.iter().copied());
        frontier = next;
    }
    all
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_opening_successors_keep_all_pieces() {
    let state = opening();
    assert_eq!(state.army1.pieces(), cells(&[(2, 0), (0, 0), (1, 0), (3, 0), (4, 0)]).as_slice());
    assert_eq!(state.army2.pieces(), cells(&[(2, 4), (0, 4), (1, 4), (3, 4), (4, 4)]).as_slice());

    let successors = generate_successors(&state);
    assert!(!successors.is_empty());
    for next in &successors {
        assert_eq!(next.army1.size() + next.army2.size(), 10);
    }
}

#[test]
fn test_successors_stay_on_board_without_overlap() {
    for state in reachable(opening(), 3) {
        for army in [&state.army1, &state.army2] {
            for (i, p) in army.pieces().iter().enumerate() {
                assert!(p.in_bounds(), "{p} off board in {state}");
                assert!(!army.pieces()[i + 1..].contains(p), "shared cell in {state}");
            }
        }
    }
}

#[test]
fn test_card_pool_is_partitioned() {
    for state in reachable(opening(), 3) {
        let mut names = vec![
            state.army1.c1.name(),
            state.army1.c2.name(),
            state.army2.c1.name(),
            state.army2.c2.name(),
            state.card.name(),
        ];
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5, "card pool broken in {state}");
    }
}

#[test]
fn test_master_capture_defeats_army() {
    // Player 2's master sits on (1, 2), one Boar step above player 1's student.
    let state = BoardState::new(
        army(&[(2, 0), (1, 1)], BOAR, DRAGON),
        army(&[(1, 2), (3, 3), (4, 4)], MONKEY, OX),
        TIGER,
        Player::One,
    )
    .unwrap();
    let captures: Vec<BoardState> = generate_successors(&state)
        .into_iter()
        .filter(|s| s.army2.size() < 3)
        .collect();
    assert!(!captures.is_empty());
    for capture in captures {
        assert_eq!(capture.army2.size(), 0);
        assert!(generate_successors(&capture).is_empty());
        assert_eq!(winner(&capture), Player::One);
    }
}

#[test]
fn test_shrine_win_defeats_opponent() {
    let state = near_win();
    let wins: Vec<BoardState> = generate_successors(&state)
        .into_iter()
        .filter(|s| s.army1.master() == Some(Player::One.shrine()))
        .collect();
    assert_eq!(wins.len(), 1);
    assert!(wins[0].army2.is_defeated());
    assert_eq!(wins[0].card, CRAB);
    assert!(wins[0].army1.holds(&ROOSTER) && wins[0].army1.holds(&TIGER));
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_score_player_is_zero_sum() {
    for state in reachable(opening(), 2) {
        assert_eq!(score_player(&state, Player::One), -score_player(&state, Player::Two));
        assert_eq!(
            score_player(&state, Player::One),
            score_for_side(&state, Player::One) - score_for_side(&state, Player::Two)
        );
    }
}

// =============================================================================
// UCT
// =============================================================================

#[test]
fn test_uct_monotone_in_wins() {
    for visits in 1..20u32 {
        for parent in visits..40 {
            for wins in 0..visits {
                let lo = uct(wins as f64 / visits as f64, visits, parent);
                let hi = uct((wins + 1) as f64 / visits as f64, visits, parent);
                assert!(hi > lo);
            }
        }
    }
}

#[test]
fn test_uct_decreasing_in_visits() {
    for parent in [2u32, 10, 100, 12368] {
        for ratio in [0.0, 0.25, 0.5, 1.0] {
            for v in 1..50u32 {
                assert!(uct(ratio, v, parent) > uct(ratio, v + 1, parent));
            }
        }
    }
}

// =============================================================================
// Strategies
// =============================================================================

#[test]
fn test_no_move_available_for_every_strategy() {
    let done = generate_successors(&near_win())
        .into_iter()
        .find(|s| s.army2.is_defeated())
        .unwrap();
    let mut rng = fastrand::Rng::with_seed(17);
    for strategy in [
        Strategy::Random,
        Strategy::Utility,
        Strategy::Negamax { depth: 2 },
        Strategy::ParallelNegamax { depth: 2 },
        Strategy::Mcts { iterations: 20 },
    ] {
        assert_eq!(choose_move(strategy, &done, &mut rng), None, "{strategy}");
    }
}

#[test]
fn test_every_strategy_finds_the_shrine() {
    let mut rng = fastrand::Rng::with_seed(23);
    for strategy in [
        Strategy::Utility,
        Strategy::Negamax { depth: 0 },
        Strategy::Negamax { depth: 1 },
        Strategy::ParallelNegamax { depth: 2 },
        Strategy::Mcts { iterations: 200 },
    ] {
        let next = choose_move(strategy, &near_win(), &mut rng).unwrap();
        assert!(next.army2.is_defeated(), "{strategy} missed the win");
    }
}

#[test]
fn test_parallel_negamax_matches_sequential() {
    let mut rng = fastrand::Rng::with_seed(31);
    for _ in 0..3 {
        let state = deal(&standard_deck(), &mut rng).unwrap();
        assert_eq!(parallel_negamax(&state, 0), negamax(&state, 1));
        for depth in 1..3 {
            assert_eq!(negamax(&state, depth), parallel_negamax(&state, depth));
        }
    }
}

// =============================================================================
// MCTS
// =============================================================================

#[test]
fn test_mcts_picks_winning_move() {
    let mut tree = Tree::new(near_win());
    let root = tree.root();
    let mut rng = fastrand::Rng::with_seed(99);
    let best = tree.search(root, 100, &mut rng).unwrap();

    let child = tree.node(best);
    assert!(child.state().army2.is_defeated());
    assert_eq!(child.state().player, Player::Two);
    // Every playout through the win is a loss for the side to move there.
    assert!(child.visit_count() > 0);
    assert_eq!(child.win_count(), 0);
    assert_eq!(child.loss_count(), child.visit_count());
    assert_eq!(child.win_ratio(Player::One), 1.0);
    assert_eq!(tree.node(root).visit_count(), 100);
}

#[test]
fn test_mcts_tree_reuse_across_moves() {
    let mut tree = Tree::new(opening());
    let root = tree.root();
    let mut rng = fastrand::Rng::with_seed(12);
    let first = tree.search(root, 100, &mut rng).unwrap();
    let visits_before = tree.node(first).visit_count();
    let reply = tree.search(first, 100, &mut rng).unwrap();
    assert_eq!(tree.node(first).visit_count(), visits_before + 100);
    assert_eq!(tree.node(reply).parent(), Some(first));
    // The earlier root is not touched by a search below `first`.
    assert_eq!(tree.node(root).visit_count(), 100);
}

#[test]
fn test_mcts_node_ids_restart_per_tree() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..2 {
        let mut tree = Tree::new(opening());
        let root = tree.root();
        assert_eq!(tree.node(root).id(), 0);
        assert!(tree.node(root).is_root());
        tree.search(root, 10, &mut rng);
        for id in 0..tree.len() {
            assert_eq!(tree.node(id).id(), id);
        }
    }
}
