//! Token movement and capture resolution.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use crate::board::{coordinate_of, is_safe, Coord};
use crate::core::{
    DiceValue, GameEvent, GameState, PlayerId, Token, TokenId, TokenPosition, ENTRY_STEP,
};

/// Everything a renderer needs to animate one resolved move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolution {
    pub token: TokenId,
    pub player: PlayerId,
    pub dice: DiceValue,
    pub from: TokenPosition,
    pub to: TokenPosition,
    /// Cells visited in order, landing cell last.
    pub trail: SmallVec<[Coord; 6]>,
    /// Opponent tokens sent back to base, in id order.
    pub captured: SmallVec<[TokenId; 4]>,
    /// The mover rolls again.
    pub bonus_roll: bool,
    /// Set when this move finished the game.
    pub winner: Option<PlayerId>,
}

impl MoveResolution {
    #[must_use]
    pub fn reached_home(&self) -> bool {
        self.to == TokenPosition::Home
    }
}

/// Cells a token passes through going from `from` to `to`.
///
/// A token leaving base appears directly on its entry square.
#[must_use]
pub fn trail(player: PlayerId, from: TokenPosition, to: TokenPosition) -> SmallVec<[Coord; 6]> {
    let Some(end) = to.step() else {
        return SmallVec::new();
    };
    let start = match from {
        TokenPosition::Base => ENTRY_STEP,
        TokenPosition::Active { step } => step + 1,
        TokenPosition::Home => return SmallVec::new(),
    };
    (start..=end)
        .map(|step| coordinate_of(player, step as i8))
        .collect()
}

/// Opponent tokens that a token of `mover` landing on `landing` would capture.
#[must_use]
pub fn capture_victims(state: &GameState, mover: PlayerId, landing: Coord) -> SmallVec<[TokenId; 4]> {
    if is_safe(landing) {
        return SmallVec::new();
    }
    state
        .occupants_at(landing)
        .into_iter()
        .filter(|&id| id.owner() != mover && state.token(id).is_active())
        .collect()
}

/// Move `token` to `to` on the working state and resolve captures.
///
/// Selection has already been validated. Turn bookkeeping (bonus roll, win,
/// rotation) is left to the caller.
pub(crate) fn move_token(
    state: &mut GameState,
    token: Token,
    to: TokenPosition,
    dice: DiceValue,
) -> MoveResolution {
    let player = token.owner();
    let from = token.position;

    state.set_position(token.id, to);
    state.record(match from {
        TokenPosition::Base => GameEvent::Entered { token: token.id },
        _ => GameEvent::Advanced {
            token: token.id,
            from,
            to,
        },
    });

    let captured = match to {
        TokenPosition::Home => {
            state.record(GameEvent::ReachedHome { token: token.id });
            SmallVec::new()
        }
        _ => {
            let landing = coordinate_of(player, to.step_index());
            let victims = capture_victims(state, player, landing);
            for &victim in &victims {
                state.set_position(victim, TokenPosition::Base);
                state.record(GameEvent::Captured {
                    by: token.id,
                    victim,
                });
                info!(by = %token.id, victim = %victim, cell = %landing, "token captured");
            }
            victims
        }
    };

    MoveResolution {
        token: token.id,
        player,
        dice,
        from,
        to,
        trail: trail(player, from, to),
        captured,
        bonus_roll: false,
        winner: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_from_base_is_entry_square() {
        let trail = trail(PlayerId::RED, TokenPosition::Base, TokenPosition::Active { step: 0 });
        assert_eq!(trail.as_slice(), &[Coord::new(1, 6)]);
    }

    #[test]
    fn test_trail_lists_every_step() {
        let trail = trail(
            PlayerId::RED,
            TokenPosition::Active { step: 2 },
            TokenPosition::Active { step: 7 },
        );
        assert_eq!(
            trail.as_slice(),
            &[
                Coord::new(4, 6),
                Coord::new(5, 6),
                Coord::new(6, 5),
                Coord::new(6, 4),
                Coord::new(6, 3),
            ]
        );
    }

    #[test]
    fn test_trail_into_home_ends_at_center() {
        let trail = trail(
            PlayerId::BLUE,
            TokenPosition::Active { step: 54 },
            TokenPosition::Home,
        );
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.last(), Some(&Coord::CENTER));
    }

    #[test]
    fn test_no_victims_on_safe_square() {
        let green = TokenId::for_player(PlayerId::GREEN, 0);
        let state = GameState::arrange()
            .place(green, TokenPosition::Active { step: 0 })
            .build()
            .unwrap();

        // Green's entry square is safe
        assert!(capture_victims(&state, PlayerId::RED, Coord::new(8, 1)).is_empty());
    }

    #[test]
    fn test_victims_exclude_own_tokens() {
        let red = TokenId::for_player(PlayerId::RED, 1);
        let blue = TokenId::for_player(PlayerId::BLUE, 1);
        // Red step 3 = (4, 6); Blue reaches it at step 16
        let state = GameState::arrange()
            .place(red, TokenPosition::Active { step: 3 })
            .place(blue, TokenPosition::Active { step: 16 })
            .build()
            .unwrap();

        let landing = Coord::new(4, 6);
        assert_eq!(capture_victims(&state, PlayerId::RED, landing).as_slice(), &[blue]);
        assert_eq!(capture_victims(&state, PlayerId::BLUE, landing).as_slice(), &[red]);
    }
}
