//! Errors raised while setting up a position.
//!
//! Rules and search never fail: a position without legal moves is reported
//! as `None`, not as an error.

use thiserror::Error;

use crate::vector::Vector2i;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("army must hold between 1 and {max} pieces, got {got}")]
    PieceCount { got: usize, max: usize },

    #[error("piece at {0} is off the board")]
    OffBoard(Vector2i),

    #[error("two pieces of the same army share cell {0}")]
    SharedCell(Vector2i),

    #[error("pieces of both armies share cell {0}")]
    ArmiesOverlap(Vector2i),

    #[error("card {name} must carry between 1 and {max} moves, got {got}")]
    CardMoves {
        name: &'static str,
        got: usize,
        max: usize,
    },

    #[error("card {0} appears more than once in the card pool")]
    DuplicateCard(&'static str),

    #[error("deck holds {0} cards, at least 5 are needed to deal")]
    DeckTooSmall(usize),
}
