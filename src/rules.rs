//! Move generation and game outcome.
//!
//! For the side to move, every piece (master included) is tried with every
//! offset of both held cards. A move that leaves the board or lands on an
//! own piece is rejected. The master stepping onto the opponent's shrine
//! wins outright; landing on an enemy piece captures it; anything else is a
//! quiet move.
//!
//! After a move the used card becomes the floating card and the previously
//! floating card joins the mover's hand.

use crate::army::Army;
use crate::card::Card;
use crate::state::{BoardState, Player};
use crate::vector::Vector2i;

/// Every legal successor of `state`, in generation order.
///
/// An empty result means the position is terminal.
pub fn generate_successors(state: &BoardState) -> Vec<BoardState> {
    let mut result = Vec::new();
    next_states(state, &mut result);
    result
}

/// Append the successors of `state` to `result`.
///
/// Order: for each piece by index, the offsets of `c1` then those of `c2`.
pub fn next_states(state: &BoardState, result: &mut Vec<BoardState>) {
    let player = state.player;
    let army = state.army(player);

    for i in 0..army.size() {
        for m in army.c1.moves_for(player) {
            apply_move(state, army, i, m, army.c1, army.c2, result);
        }
        for m in army.c2.moves_for(player) {
            apply_move(state, army, i, m, army.c2, army.c1, result);
        }
    }
}

/// Number of legal moves for the side to move.
pub fn count_moves(state: &BoardState) -> usize {
    let mut moves = Vec::new();
    next_states(state, &mut moves);
    moves.len()
}

/// True if the side to move has no legal move.
pub fn is_terminal(state: &BoardState) -> bool {
    count_moves(state) == 0
}

/// Winner of a finished game: the side with strictly more pieces left,
/// player 2 on a tie.
pub fn winner(state: &BoardState) -> Player {
    if state.army1.size() > state.army2.size() {
        Player::One
    } else {
        Player::Two
    }
}

fn apply_move(
    state: &BoardState,
    army: &Army,
    id: usize,
    offset: Vector2i,
    used: Card,
    kept: Card,
    result: &mut Vec<BoardState>,
) {
    let player = state.player;
    let dest = army.piece(id) + offset;
    if !dest.in_bounds() || army.piece_at(dest).is_some() {
        return;
    }

    let moved = army.with_replaced_piece(id, dest, kept, state.card);
    let enemy = state.army(player.opponent());

    let new_enemy = if id == 0 && dest == player.shrine() {
        enemy.defeated()
    } else if let Some(j) = enemy.piece_at(dest) {
        enemy.with_removed_piece(j)
    } else {
        *enemy
    };

    result.push(successor(player, moved, new_enemy, used));
}

fn successor(player: Player, own: Army, enemy: Army, used: Card) -> BoardState {
    let (a1, a2) = match player {
        Player::One => (own, enemy),
        Player::Two => (enemy, own),
    };
    BoardState::from_parts(a1, a2, used, player.opponent())
}
