//! Static heuristic evaluation.
//!
//! A side's score is its material (`SCORE_UNIT` per piece) plus a small
//! reward for every candidate move its pieces could make with its two
//! cards. Rewards for wins and captures depend on whether that side is the
//! one to move: a win available now is worth `SCORE_CHECKMATE`, the same win
//! one turn away only `SCORE_CHECK`.

use crate::army::Army;
use crate::constants::{
    SCORE_CHECK, SCORE_CHECKMATE, SCORE_KILL, SCORE_PROTECT, SCORE_THREAT, SCORE_TILE, SCORE_UNIT,
};
use crate::state::{BoardState, Player};
use crate::vector::Vector2i;

/// Score of `player`'s side alone.
pub fn score_for_side(state: &BoardState, player: Player) -> i32 {
    let active = state.player == player;
    let army = state.army(player);
    let enemy = state.army(player.opponent());
    let win_pos = player.shrine();

    let mut score = army.size() as i32 * SCORE_UNIT;
    for i in 0..army.size() {
        for m in army.c1.moves_for(player).chain(army.c2.moves_for(player)) {
            score += score_move(m, i, win_pos, army, enemy, active);
        }
    }
    score
}

/// Zero-sum score of `player` relative to the opponent.
#[inline]
pub fn score_player(state: &BoardState, player: Player) -> i32 {
    score_for_side(state, player) - score_for_side(state, player.opponent())
}

fn score_move(
    offset: Vector2i,
    id: usize,
    win_pos: Vector2i,
    army: &Army,
    enemy: &Army,
    active: bool,
) -> i32 {
    let dest = army.piece(id) + offset;
    if !dest.in_bounds() {
        return 0;
    }

    if id == 0 && dest == win_pos {
        return if active { SCORE_CHECKMATE } else { SCORE_CHECK };
    }

    if let Some(i) = army.piece_at(dest) {
        return if i == 0 { 0 } else { SCORE_PROTECT };
    }

    match enemy.piece_at(dest) {
        Some(0) if active => SCORE_CHECKMATE,
        Some(0) => SCORE_CHECK,
        Some(_) if active => SCORE_KILL,
        Some(_) => SCORE_THREAT,
        None => SCORE_TILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{BOAR, CRAB, Card, MONKEY, OX, TIGER};
    use crate::rules::generate_successors;
    use crate::state::create_initial_state;

    fn army(pieces: &[(i32, i32)], c1: Card, c2: Card) -> Army {
        let cells: Vec<Vector2i> = pieces.iter().map(|&(x, y)| Vector2i::new(x, y)).collect();
        Army::from_pieces(&cells, c1, c2).unwrap()
    }

    #[test]
    fn test_initial_score_is_material_plus_mobility() {
        let state = create_initial_state([TIGER, CRAB], [MONKEY, OX], BOAR).unwrap();
        // Tiger jumps: 5 tiles. Crab sideways steps land on own students
        // (2 + 2 protects, one each way lands on the master for 0), and
        // its forward step gives 5 tiles.
        assert_eq!(score_for_side(&state, Player::One), 500 + 5 + 4 + 5);
    }

    #[test]
    fn test_checkmate_only_counts_for_side_to_move() {
        let a1 = army(&[(2, 3)], CRAB, TIGER);
        let a2 = army(&[(0, 4)], MONKEY, OX);
        let to_move = BoardState::new(a1, a2, BOAR, Player::One).unwrap();
        let waiting = BoardState::new(a1, a2, BOAR, Player::Two).unwrap();
        let now = score_for_side(&to_move, Player::One);
        let later = score_for_side(&waiting, Player::One);
        assert_eq!(now - later, SCORE_CHECKMATE - SCORE_CHECK);
    }

    #[test]
    fn test_zero_sum() {
        let state = create_initial_state([TIGER, CRAB], [MONKEY, OX], BOAR).unwrap();
        for next in generate_successors(&state) {
            assert_eq!(score_player(&next, Player::One), -score_player(&next, Player::Two));
            for after in generate_successors(&next) {
                assert_eq!(
                    score_player(&after, Player::One),
                    -score_player(&after, Player::Two)
                );
            }
        }
    }
}
