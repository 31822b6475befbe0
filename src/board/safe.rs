//! Safe squares: every seat's entry square and its globe square.
//!
//! Tokens standing on a safe square can never be captured.

use super::coord::Coord;
use super::path::{GLOBE_STEP, PATHS};
use crate::core::{ENTRY_STEP, PLAYER_COUNT};

/// All safe squares: the four entry squares, then the four globes.
pub const SAFE_SQUARES: [Coord; 2 * PLAYER_COUNT] = derive_safe_squares();

const fn derive_safe_squares() -> [Coord; 2 * PLAYER_COUNT] {
    let mut squares = [Coord::CENTER; 2 * PLAYER_COUNT];
    let mut p = 0;
    while p < PLAYER_COUNT {
        squares[p] = PATHS[p][ENTRY_STEP as usize];
        squares[PLAYER_COUNT + p] = PATHS[p][GLOBE_STEP as usize];
        p += 1;
    }
    squares
}

/// Is `coord` exempt from capture?
///
/// ```
/// use ludo_engine::board::{is_safe, Coord};
///
/// assert!(is_safe(Coord::new(1, 6)));
/// assert!(!is_safe(Coord::new(3, 6)));
/// ```
#[must_use]
pub fn is_safe(coord: Coord) -> bool {
    SAFE_SQUARES.contains(&coord)
}
