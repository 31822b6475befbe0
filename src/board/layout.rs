//! Read-only placement helpers for renderers.
//!
//! Nothing here affects game outcomes. Base tokens have no path coordinate,
//! so they are drawn at fixed slots inside their seat's 6x6 house.

use super::coord::Coord;
use super::path::coordinate_of;
use crate::core::{PlayerId, Token, TokenPosition};

/// Cells per side of a base house.
pub const HOUSE_SIZE: u8 = 6;

/// Top-left cell of `player`'s base house.
///
/// Red's house is the top-left corner; the others follow by rotation.
#[must_use]
pub fn house_origin(player: PlayerId) -> Coord {
    let turns = player.index();
    let a = Coord::new(0, 0).rotate_by(turns);
    let b = Coord::new(HOUSE_SIZE - 1, HOUSE_SIZE - 1).rotate_by(turns);
    Coord::new(a.x.min(b.x), a.y.min(b.y))
}

/// Cell-unit centre of base slot `slot` (0..4) in `player`'s house.
///
/// Slots fill left-to-right, top-to-bottom.
#[must_use]
pub fn base_slot(player: PlayerId, slot: u8) -> (f32, f32) {
    let origin = house_origin(player);
    let dx = if slot % 2 == 1 { 4.0 } else { 1.5 };
    let dy = if slot > 1 { 4.0 } else { 1.5 };
    (
        f32::from(origin.x) + dx - 0.5,
        f32::from(origin.y) + dy - 0.5,
    )
}

/// Where a renderer should draw `token`, in cell units.
#[must_use]
pub fn anchor_of(token: &Token) -> (f32, f32) {
    match token.position {
        TokenPosition::Base => base_slot(token.owner(), token.id.slot()),
        position => coordinate_of(token.owner(), position.step_index()).to_f32(),
    }
}
