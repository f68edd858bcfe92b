use std::fmt;
use std::ops::{Add, Neg};

use crate::constants::BOARD_SIZE;

/// A 2D integer vector, used both for board cells and relative offsets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if this cell lies on the 5x5 board.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }
}

impl Add for Vector2i {
    type Output = Vector2i;

    #[inline]
    fn add(self, rhs: Vector2i) -> Vector2i {
        Vector2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Vector2i {
    type Output = Vector2i;

    #[inline]
    fn neg(self) -> Vector2i {
        Vector2i::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
