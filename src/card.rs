//! Move cards and the standard sixteen-card deck.
//!
//! Offsets are stored in player 1's orientation (+y points toward player 2).
//! Player 2 reads every offset negated, which mirrors the board for them.

use std::fmt;

use crate::constants::MAX_CARD_MOVES;
use crate::error::SetupError;
use crate::state::Player;
use crate::vector::Vector2i;

/// An immutable, named list of relative move offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    name: &'static str,
    moves: [Vector2i; MAX_CARD_MOVES],
    len: u8,
}

impl Card {
    /// Create a card, rejecting empty or oversized offset lists.
    pub fn new(name: &'static str, offsets: &[Vector2i]) -> Result<Self, SetupError> {
        if offsets.is_empty() || offsets.len() > MAX_CARD_MOVES {
            return Err(SetupError::CardMoves {
                name,
                got: offsets.len(),
                max: MAX_CARD_MOVES,
            });
        }
        Ok(Self::from_offsets(name, offsets))
    }

    const fn from_offsets(name: &'static str, offsets: &[Vector2i]) -> Self {
        let mut moves = [Vector2i::new(0, 0); MAX_CARD_MOVES];
        let mut i = 0;
        while i < offsets.len() {
            moves[i] = offsets[i];
            i += 1;
        }
        Card {
            name,
            moves,
            len: offsets.len() as u8,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Offsets in player 1's orientation.
    pub fn moves(&self) -> &[Vector2i] {
        &self.moves[..self.len as usize]
    }

    pub fn num_moves(&self) -> usize {
        self.len as usize
    }

    /// Offset `i` as seen by `player`.
    #[inline]
    pub fn get_move(&self, i: usize, player: Player) -> Vector2i {
        let m = self.moves()[i];
        match player {
            Player::One => m,
            Player::Two => -m,
        }
    }

    /// All offsets as seen by `player`.
    pub fn moves_for(&self, player: Player) -> impl Iterator<Item = Vector2i> + '_ {
        (0..self.num_moves()).map(move |i| self.get_move(i, player))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// Standard Deck
// =============================================================================

const L: Vector2i = Vector2i::new(-1, 0);
const LU: Vector2i = Vector2i::new(-1, 1);
const LD: Vector2i = Vector2i::new(-1, -1);
const LL: Vector2i = Vector2i::new(-2, 0);
const LLU: Vector2i = Vector2i::new(-2, 1);
const R: Vector2i = Vector2i::new(1, 0);
const RU: Vector2i = Vector2i::new(1, 1);
const RD: Vector2i = Vector2i::new(1, -1);
const RR: Vector2i = Vector2i::new(2, 0);
const RRU: Vector2i = Vector2i::new(2, 1);
const D: Vector2i = Vector2i::new(0, -1);
const U: Vector2i = Vector2i::new(0, 1);
const UU: Vector2i = Vector2i::new(0, 2);

pub const ROOSTER: Card = Card::from_offsets("Rooster", &[L, LD, R, RU]);
pub const MANTIS: Card = Card::from_offsets("Mantis", &[LU, D, RU]);
pub const BOAR: Card = Card::from_offsets("Boar", &[L, U, R]);
pub const CRANE: Card = Card::from_offsets("Crane", &[LD, U, RD]);
pub const HORSE: Card = Card::from_offsets("Horse", &[L, U, D]);
pub const CRAB: Card = Card::from_offsets("Crab", &[LL, U, RR]);
pub const FROG: Card = Card::from_offsets("Frog", &[LL, LU, RD]);
pub const RABBIT: Card = Card::from_offsets("Rabbit", &[LD, RU, RR]);
pub const OX: Card = Card::from_offsets("Ox", &[U, R, D]);
pub const DRAGON: Card = Card::from_offsets("Dragon", &[LLU, LD, RD, RRU]);
pub const EEL: Card = Card::from_offsets("Eel", &[LU, LD, R]);
pub const MONKEY: Card = Card::from_offsets("Monkey", &[LU, LD, RU, RD]);
pub const COBRA: Card = Card::from_offsets("Cobra", &[L, RU, RD]);
pub const ELEPHANT: Card = Card::from_offsets("Elephant", &[L, LU, R, RU]);
pub const TIGER: Card = Card::from_offsets("Tiger", &[UU, D]);
pub const GOOSE: Card = Card::from_offsets("Goose", &[L, LU, R, RD]);

/// The sixteen standard cards, in a fixed order.
pub fn standard_deck() -> Vec<Card> {
    vec![
        ROOSTER, MANTIS, BOAR, CRANE, HORSE, CRAB, FROG, RABBIT, OX, DRAGON, EEL, MONKEY, COBRA,
        ELEPHANT, TIGER, GOOSE,
    ]
}

/// Look up a standard card by name, ignoring case.
pub fn find_card(name: &str) -> Option<Card> {
    standard_deck()
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_move_mirrors_for_player_two() {
        for i in 0..TIGER.num_moves() {
            assert_eq!(TIGER.get_move(i, Player::Two), -TIGER.get_move(i, Player::One));
        }
        assert_eq!(TIGER.get_move(0, Player::One), Vector2i::new(0, 2));
        assert_eq!(TIGER.get_move(0, Player::Two), Vector2i::new(0, -2));
    }

    #[test]
    fn test_standard_deck() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 16);
        for (i, a) in deck.iter().enumerate() {
            assert!((1..=MAX_CARD_MOVES).contains(&a.num_moves()));
            for b in &deck[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_offsets() {
        assert!(Card::new("Empty", &[]).is_err());
        assert!(Card::new("Wide", &[L, R, U, D, UU]).is_err());
        let card = Card::new("Step", &[U]).unwrap();
        assert_eq!(card.moves(), &[U]);
    }

    #[test]
    fn test_find_card() {
        assert_eq!(find_card("tiger"), Some(TIGER));
        assert_eq!(find_card("Dragon"), Some(DRAGON));
        assert_eq!(find_card("unicorn"), None);
    }
}
