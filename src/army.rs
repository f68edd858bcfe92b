//! One side's pieces and the two cards it holds.
//!
//! Index 0 is always the master. Armies are values: both transforms return
//! a new army and leave the source untouched.

use std::fmt;

use crate::card::Card;
use crate::constants::{ARMY_CAPACITY, START_COLUMNS};
use crate::error::SetupError;
use crate::vector::Vector2i;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Army {
    pieces: [Vector2i; ARMY_CAPACITY],
    len: u8,
    pub c1: Card,
    pub c2: Card,
}

impl Army {
    /// A full army on `row`: master on the centre column, students on the rest.
    pub fn new(row: i32, c1: Card, c2: Card) -> Self {
        let mut pieces = [Vector2i::default(); ARMY_CAPACITY];
        for (piece, &x) in pieces.iter_mut().zip(START_COLUMNS.iter()) {
            *piece = Vector2i::new(x, row);
        }
        Self {
            pieces,
            len: ARMY_CAPACITY as u8,
            c1,
            c2,
        }
    }

    /// An army from explicit positions, master first.
    pub fn from_pieces(positions: &[Vector2i], c1: Card, c2: Card) -> Result<Self, SetupError> {
        if positions.is_empty() || positions.len() > ARMY_CAPACITY {
            return Err(SetupError::PieceCount {
                got: positions.len(),
                max: ARMY_CAPACITY,
            });
        }
        let mut pieces = [Vector2i::default(); ARMY_CAPACITY];
        for (i, &p) in positions.iter().enumerate() {
            if !p.in_bounds() {
                return Err(SetupError::OffBoard(p));
            }
            if positions[..i].contains(&p) {
                return Err(SetupError::SharedCell(p));
            }
            pieces[i] = p;
        }
        Ok(Self {
            pieces,
            len: positions.len() as u8,
            c1,
            c2,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn piece(&self, i: usize) -> Vector2i {
        self.pieces()[i]
    }

    #[inline]
    pub fn pieces(&self) -> &[Vector2i] {
        &self.pieces[..self.len as usize]
    }

    pub fn master(&self) -> Option<Vector2i> {
        self.pieces().first().copied()
    }

    pub fn is_defeated(&self) -> bool {
        self.len == 0
    }

    /// Index of the piece on `cell`, if any.
    #[inline]
    pub fn piece_at(&self, cell: Vector2i) -> Option<usize> {
        self.pieces().iter().position(|&p| p == cell)
    }

    pub fn holds(&self, card: &Card) -> bool {
        self.c1 == *card || self.c2 == *card
    }

    /// Move piece `i` to `pos` and hold the cards `c1`, `c2`.
    pub fn with_replaced_piece(&self, i: usize, pos: Vector2i, c1: Card, c2: Card) -> Self {
        let mut army = *self;
        army.pieces[i] = pos;
        army.c1 = c1;
        army.c2 = c2;
        army
    }

    /// Remove piece `i`. Removing the master defeats the whole army.
    pub fn with_removed_piece(&self, i: usize) -> Self {
        let mut army = *self;
        if i == 0 {
            army.len = 0;
            return army;
        }
        let len = self.size();
        army.pieces.copy_within(i + 1..len, i);
        army.len -= 1;
        army
    }

    /// The army with no pieces left, keeping its cards.
    pub fn defeated(&self) -> Self {
        self.with_removed_piece(0)
    }
}

impl fmt::Display for Army {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defeated() {
            return f.write_str("defeated");
        }
        write!(f, "({}", self.size())?;
        for p in self.pieces() {
            write!(f, ", {p}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{BOAR, CRAB, TIGER};

    #[test]
    fn test_new_layout() {
        let army = Army::new(0, TIGER, CRAB);
        assert_eq!(army.size(), 5);
        assert_eq!(army.master(), Some(Vector2i::new(2, 0)));
        let xs: Vec<i32> = army.pieces().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2, 0, 1, 3, 4]);
        assert!(army.pieces().iter().all(|p| p.y == 0));
    }

    #[test]
    fn test_remove_student_preserves_order() {
        let army = Army::new(4, TIGER, CRAB);
        let smaller = army.with_removed_piece(2);
        assert_eq!(smaller.size(), 4);
        assert_eq!(
            smaller.pieces(),
            &[
                Vector2i::new(2, 4),
                Vector2i::new(0, 4),
                Vector2i::new(3, 4),
                Vector2i::new(4, 4)
            ]
        );
        // Source is untouched.
        assert_eq!(army.size(), 5);
    }

    #[test]
    fn test_remove_master_defeats_army() {
        let army = Army::from_pieces(&[Vector2i::new(2, 2), Vector2i::new(0, 0)], TIGER, CRAB)
            .unwrap();
        let gone = army.with_removed_piece(0);
        assert_eq!(gone.size(), 0);
        assert!(gone.is_defeated());
        assert_eq!(gone.master(), None);
        assert_eq!(gone.to_string(), "defeated");
    }

    #[test]
    fn test_replace_swaps_cards() {
        let army = Army::new(0, TIGER, CRAB);
        let moved = army.with_replaced_piece(1, Vector2i::new(0, 1), CRAB, BOAR);
        assert_eq!(moved.piece(1), Vector2i::new(0, 1));
        assert_eq!((moved.c1, moved.c2), (CRAB, BOAR));
        assert_eq!(army.piece(1), Vector2i::new(0, 0));
    }

    #[test]
    fn test_from_pieces_validation() {
        assert_eq!(
            Army::from_pieces(&[], TIGER, CRAB),
            Err(SetupError::PieceCount { got: 0, max: 5 })
        );
        assert_eq!(
            Army::from_pieces(&[Vector2i::new(5, 0)], TIGER, CRAB),
            Err(SetupError::OffBoard(Vector2i::new(5, 0)))
        );
        assert_eq!(
            Army::from_pieces(&[Vector2i::new(1, 1), Vector2i::new(1, 1)], TIGER, CRAB),
            Err(SetupError::SharedCell(Vector2i::new(1, 1)))
        );
    }

    #[test]
    fn test_display() {
        let army = Army::from_pieces(&[Vector2i::new(2, 0), Vector2i::new(0, 1)], TIGER, CRAB)
            .unwrap();
        assert_eq!(army.to_string(), "(2, (2, 0), (0, 1))");
    }
}
