//! Grid coordinates and the quarter-turn rotation.

use serde::{Deserialize, Serialize};

/// Cells per board side.
pub const GRID_SIZE: u8 = 15;

/// A cell on the 15x15 board, `(x, y)` = (column, row), origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// The board centre, where every path ends.
    pub const CENTER: Coord = Coord::new(7, 7);

    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Rotate 90 degrees clockwise about the board centre.
    ///
    /// ```
    /// use ludo_engine::board::Coord;
    ///
    /// let entry = Coord::new(1, 6);
    /// assert_eq!(entry.rotate(), Coord::new(8, 1));
    /// assert_eq!(entry.rotate().rotate().rotate().rotate(), entry);
    /// ```
    #[must_use]
    pub const fn rotate(self) -> Self {
        Self {
            x: GRID_SIZE - 1 - self.y,
            y: self.x,
        }
    }

    /// Apply [`Coord::rotate`] `turns` times.
    #[must_use]
    pub const fn rotate_by(self, turns: usize) -> Self {
        let mut c = self;
        let mut i = 0;
        while i < turns % 4 {
            c = c.rotate();
            i += 1;
        }
        c
    }

    /// Cell-unit position for renderers.
    #[must_use]
    pub fn to_f32(self) -> (f32, f32) {
        (f32::from(self.x), f32::from(self.y))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
