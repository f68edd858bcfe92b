//! Board state: both armies, the floating card, and the side to move.
//!
//! A `BoardState` is never mutated after construction. Every move builds a
//! fresh state (see [`crate::rules`]).

use std::fmt;

use crate::army::Army;
use crate::card::Card;
use crate::constants::{BOARD_SIZE, HOME_ROW_ONE, HOME_ROW_TWO, MASTER_COLUMN};
use crate::error::SetupError;
use crate::vector::Vector2i;

/// The two sides. Player 1 starts on row 0 and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Cell the master of this player must reach to win.
    #[inline]
    pub fn shrine(self) -> Vector2i {
        match self {
            Player::One => Vector2i::new(MASTER_COLUMN, HOME_ROW_TWO),
            Player::Two => Vector2i::new(MASTER_COLUMN, HOME_ROW_ONE),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub army1: Army,
    pub army2: Army,
    /// The card held by neither army.
    pub card: Card,
    /// Side to move.
    pub player: Player,
}

impl BoardState {
    /// Build a validated position.
    ///
    /// Fails if the armies overlap or the five cards are not all distinct.
    pub fn new(army1: Army, army2: Army, card: Card, player: Player) -> Result<Self, SetupError> {
        if let Some(&p) = army1.pieces().iter().find(|&&p| army2.piece_at(p).is_some()) {
            return Err(SetupError::ArmiesOverlap(p));
        }
        let pool = [army1.c1, army1.c2, army2.c1, army2.c2, card];
        for (i, c) in pool.iter().enumerate() {
            if pool[i + 1..].iter().any(|o| o.name() == c.name()) {
                return Err(SetupError::DuplicateCard(c.name()));
            }
        }
        Ok(Self::from_parts(army1, army2, card, player))
    }

    #[inline]
    pub(crate) fn from_parts(army1: Army, army2: Army, card: Card, player: Player) -> Self {
        Self {
            army1,
            army2,
            card,
            player,
        }
    }

    #[inline]
    pub fn army(&self, player: Player) -> &Army {
        match player {
            Player::One => &self.army1,
            Player::Two => &self.army2,
        }
    }

    /// Render the position as a 5x5 grid, row 4 at the top.
    ///
    /// Player 1 shows as `M` (master) and `p`, player 2 as `W` and `q`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (0..BOARD_SIZE).rev() {
            for x in 0..BOARD_SIZE {
                let cell = Vector2i::new(x, y);
                let ch = match (self.army1.piece_at(cell), self.army2.piece_at(cell)) {
                    (Some(0), _) => 'M',
                    (Some(_), _) => 'p',
                    (_, Some(0)) => 'W',
                    (_, Some(_)) => 'q',
                    _ => '.',
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "player 1: {} {}\nplayer 2: {} {}\nfloating: {}\nto move: player {}\n",
            self.army1.c1, self.army1.c2, self.army2.c1, self.army2.c2, self.card, self.player
        ));
        out
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.army1, self.army2)
    }
}

/// The opening position: full armies on their home rows, player 1 to move.
pub fn create_initial_state(
    army_one_cards: [Card; 2],
    army_two_cards: [Card; 2],
    floating: Card,
) -> Result<BoardState, SetupError> {
    let [a, b] = army_one_cards;
    let [c, d] = army_two_cards;
    BoardState::new(
        Army::new(HOME_ROW_ONE, a, b),
        Army::new(HOME_ROW_TWO, c, d),
        floating,
        Player::One,
    )
}

/// Shuffle `deck` and deal the opening position from its first five cards.
pub fn deal(deck: &[Card], rng: &mut fastrand::Rng) -> Result<BoardState, SetupError> {
    if deck.len() < 5 {
        return Err(SetupError::DeckTooSmall(deck.len()));
    }
    let mut cards = deck.to_vec();
    rng.shuffle(&mut cards);
    create_initial_state([cards[0], cards[1]], [cards[2], cards[3]], cards[4])
}
