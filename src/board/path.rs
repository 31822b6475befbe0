//! Player paths around the board.
//!
//! Red's route is written out once. Every other seat's route is the previous
//! seat's route turned a quarter clockwise, so all four are derived at
//! compile time from the same table.

use super::coord::Coord;
use crate::core::{PlayerId, PATH_LEN, PLAYER_COUNT};

/// Step of each seat's globe square, counted from its entry square.
pub const GLOBE_STEP: u8 = 8;

const fn c(x: u8, y: u8) -> Coord {
    Coord::new(x, y)
}

/// Red's route, step 0 (entry) through step 56 (Home).
pub const CANONICAL_PATH: [Coord; PATH_LEN] = [
    // 0..=4: leave the left arm heading right
    c(1, 6), c(2, 6), c(3, 6), c(4, 6), c(5, 6),
    // 5..=10: up the top arm
    c(6, 5), c(6, 4), c(6, 3), c(6, 2), c(6, 1), c(6, 0),
    // 11..=12: across the top
    c(7, 0), c(8, 0),
    // 13..=17: down the top arm
    c(8, 1), c(8, 2), c(8, 3), c(8, 4), c(8, 5),
    // 18..=23: out along the right arm
    c(9, 6), c(10, 6), c(11, 6), c(12, 6), c(13, 6), c(14, 6),
    // 24..=25: down the right edge
    c(14, 7), c(14, 8),
    // 26..=30: back in along the right arm
    c(13, 8), c(12, 8), c(11, 8), c(10, 8), c(9, 8),
    // 31..=36: down the bottom arm
    c(8, 9), c(8, 10), c(8, 11), c(8, 12), c(8, 13), c(8, 14),
    // 37..=38: across the bottom
    c(7, 14), c(6, 14),
    // 39..=43: up the bottom arm
    c(6, 13), c(6, 12), c(6, 11), c(6, 10), c(6, 9),
    // 44..=49: out along the left arm
    c(5, 8), c(4, 8), c(3, 8), c(2, 8), c(1, 8), c(0, 8),
    // 50: last shared cell
    c(0, 7),
    // 51..=55: home stretch
    c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7),
    // 56: Home
    Coord::CENTER,
];

/// Every seat's route, indexed by `PlayerId::index()`.
pub const PATHS: [[Coord; PATH_LEN]; PLAYER_COUNT] = derive_paths();

const fn derive_paths() -> [[Coord; PATH_LEN]; PLAYER_COUNT] {
    let mut paths = [CANONICAL_PATH; PLAYER_COUNT];
    let mut p = 1;
    while p < PLAYER_COUNT {
        let mut i = 0;
        while i < PATH_LEN {
            paths[p][i] = paths[p - 1][i].rotate();
            i += 1;
        }
        p += 1;
    }
    paths
}

/// The full route of `player`.
#[must_use]
pub fn path_of(player: PlayerId) -> &'static [Coord; PATH_LEN] {
    &PATHS[player.index()]
}

/// Grid cell of `player`'s token at `step_index`.
///
/// Step indices outside `0..=56` (Base included) clamp to the centre.
/// Renderers place Base tokens with [`base_slot`](super::base_slot) instead.
///
/// ```
/// use ludo_engine::board::{coordinate_of, Coord};
/// use ludo_engine::core::PlayerId;
///
/// assert_eq!(coordinate_of(PlayerId::RED, 0), Coord::new(1, 6));
/// assert_eq!(coordinate_of(PlayerId::GREEN, 0), Coord::new(8, 1));
/// assert_eq!(coordinate_of(PlayerId::BLUE, 56), Coord::CENTER);
/// ```
#[must_use]
pub fn coordinate_of(player: PlayerId, step_index: i8) -> Coord {
    match usize::try_from(step_index) {
        Ok(step) if step < PATH_LEN => PATHS[player.index()][step],
        _ => Coord::CENTER,
    }
}
