//! The turn state machine: rolling, selecting, passing the turn.
//!
//! Each operation takes a snapshot and returns a [`Transition`] holding the
//! successor snapshot. Commands that are not allowed right now come back as
//! [`Outcome::Rejected`] with the input state unchanged.

use tracing::{debug, info, trace};

use super::engine::{Outcome, Rejection, Transition};
use super::movement::move_token;
use crate::core::state::messages;
use crate::core::{
    DiceSource, DiceValue, GameEvent, GameState, Playable, TokenId, TurnPhase,
};

/// The current player's tokens that may move by `dice`, in id order.
#[must_use]
pub fn playable_tokens(state: &GameState, dice: DiceValue) -> Playable {
    state
        .tokens_of(state.current_player())
        .filter(|token| token.can_move(dice))
        .map(|token| token.id)
        .collect()
}

/// Roll for the current player.
///
/// With no legal move the turn passes straight away. A six still earns the
/// bonus roll in that case.
pub fn roll_dice<D: DiceSource + ?Sized>(state: &GameState, dice: &mut D) -> Transition {
    if state.is_game_over() {
        return reject(state, Rejection::GameOver);
    }
    if !state.roll_allowed() {
        return reject(state, Rejection::RollNotAllowed);
    }

    let player = state.current_player();
    let value = dice.roll();
    let playable = playable_tokens(state, value);
    debug!(player = %player, dice = value.get(), playable = playable.len(), "rolled");

    let mut next = state.clone();
    next.set_last_roll(value);
    next.record(GameEvent::Rolled {
        player,
        dice: value,
        playable: playable.len() as u8,
    });

    if playable.is_empty() {
        next.record(GameEvent::NoMoves { player, dice: value });
        advance_turn(&mut next, value.is_six());
        let then = next.status_message().to_string();
        next.set_status(messages::no_moves(player, value, &then));
        return accept(
            next,
            Outcome::Passed {
                player,
                dice: value,
                bonus_roll: value.is_six(),
            },
        );
    }

    next.set_status(messages::rolled(player, value));
    next.set_phase(TurnPhase::AwaitingSelection {
        dice: value,
        playable: playable.clone(),
    });
    accept(
        next,
        Outcome::Rolled {
            player,
            dice: value,
            playable,
        },
    )
}

/// Move a playable token by the pending roll.
pub fn select_token(state: &GameState, id: TokenId) -> Transition {
    let (dice, playable) = match state.phase() {
        TurnPhase::GameOver { .. } => return reject(state, Rejection::GameOver),
        TurnPhase::AwaitingRoll => return reject(state, Rejection::NotAwaitingSelection),
        TurnPhase::AwaitingSelection { dice, playable } => (*dice, playable),
    };
    if !playable.contains(&id) {
        return reject(state, Rejection::NotPlayable(id));
    }
    let token = *state.token(id);
    let Some(to) = token.destination(dice) else {
        return reject(state, Rejection::NotPlayable(id));
    };

    let player = token.owner();
    let mut next = state.clone();
    let mut resolution = move_token(&mut next, token, to, dice);
    debug!(
        token = %id,
        from = %resolution.from,
        to = %resolution.to,
        captured = resolution.captured.len(),
        "moved"
    );

    if next.all_home(player) {
        next.set_phase(TurnPhase::GameOver { winner: player });
        next.set_status(messages::won(player));
        next.record(GameEvent::Won { player });
        info!(winner = %player, turn = next.turn_number(), "game over");
        resolution.winner = Some(player);
    } else {
        advance_turn(&mut next, dice.is_six());
        resolution.bonus_roll = dice.is_six();
    }

    accept(next, Outcome::Moved(resolution))
}

/// Close out the current roll: same player again on a six, otherwise the
/// next player in turn order.
pub(crate) fn advance_turn(state: &mut GameState, dice_was_six: bool) {
    let player = state.current_player();
    state.set_phase(TurnPhase::AwaitingRoll);

    if dice_was_six {
        state.record(GameEvent::BonusRoll { player });
        state.set_status(messages::bonus(player));
        debug!(player = %player, "bonus roll");
    } else {
        let next = player.next();
        state.record(GameEvent::TurnPassed { from: player, to: next });
        state.set_current_player(next);
        state.set_status(messages::turn(next));
        debug!(from = %player, to = %next, "turn passed");
    }
}

fn accept(state: GameState, outcome: Outcome) -> Transition {
    debug_assert_eq!(state.check_invariants(), Ok(()));
    Transition { state, outcome }
}

fn reject(state: &GameState, reason: Rejection) -> Transition {
    trace!(?reason, player = %state.current_player(), "command rejected");
    Transition {
        state: state.clone(),
        outcome: Outcome::Rejected(reason),
    }
}
