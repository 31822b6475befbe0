//! Rules engine trait and transition results.
//!
//! Rules implement `RulesEngine` to define:
//! - What commands are legal in a state
//! - How a command turns one state into the next
//! - When the game is over
//!
//! A session drives a game through this trait and never interprets
//! rule-specific concepts directly.

use serde::{Deserialize, Serialize};

use super::movement::MoveResolution;
use super::turn;
use crate::core::{Command, DiceSource, DiceValue, GameState, Playable, PlayerId, TokenId, TurnPhase};

/// Why a command was turned away. Informational, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The game has a winner.
    GameOver,
    /// A roll is already pending a selection.
    RollNotAllowed,
    /// No roll is pending.
    NotAwaitingSelection,
    /// The token cannot move with the pending roll.
    NotPlayable(TokenId),
}

/// What a transition did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing happened; the state is unchanged.
    Rejected(Rejection),
    /// The roll left a choice of tokens.
    Rolled {
        player: PlayerId,
        dice: DiceValue,
        playable: Playable,
    },
    /// The roll left nothing to move.
    Passed {
        player: PlayerId,
        dice: DiceValue,
        bonus_roll: bool,
    },
    Moved(MoveResolution),
}

/// A successor state together with what produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
}

impl Transition {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self.outcome, Outcome::Rejected(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self.outcome {
            Outcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_commands`: empty once the game is over
/// - `apply`: must be pure apart from drawing from `dice`
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Every command the current player may issue.
    fn legal_commands(&self, state: &GameState) -> Vec<Command>;

    /// Apply a command. Only `Command::Roll` draws from `dice`.
    fn apply(&self, state: &GameState, command: Command, dice: &mut dyn DiceSource) -> Transition;

    /// The winner, if the game has ended.
    fn is_terminal(&self, state: &GameState) -> Option<PlayerId>;

    // === Convenience Methods ===

    fn initial_state(&self) -> GameState {
        GameState::initial()
    }

    fn is_legal(&self, state: &GameState, command: Command) -> bool {
        self.legal_commands(state).contains(&command)
    }
}

/// Classic four-player Ludo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LudoRules;

impl RulesEngine for LudoRules {
    fn legal_commands(&self, state: &GameState) -> Vec<Command> {
        match state.phase() {
            TurnPhase::AwaitingRoll => vec![Command::Roll],
            TurnPhase::AwaitingSelection { playable, .. } => {
                playable.iter().copied().map(Command::Select).collect()
            }
            TurnPhase::GameOver { .. } => Vec::new(),
        }
    }

    fn apply(&self, state: &GameState, command: Command, dice: &mut dyn DiceSource) -> Transition {
        match command {
            Command::Roll => turn::roll_dice(state, dice),
            Command::Select(id) => turn::select_token(state, id),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<PlayerId> {
        state.winner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedDice, TokenPosition};

    #[test]
    fn test_legal_commands_follow_phase() {
        let rules = LudoRules;
        let state = rules.initial_state();
        assert_eq!(rules.legal_commands(&state), vec![Command::Roll]);

        let mut dice = ScriptedDice::constant(DiceValue::SIX);
        let rolled = rules.apply(&state, Command::Roll, &mut dice).into_state();
        let expected: Vec<_> = crate::core::TokenId::of_player(PlayerId::RED)
            .map(Command::Select)
            .collect();
        assert_eq!(rules.legal_commands(&rolled), expected);
        assert!(!rules.is_legal(&rolled, Command::Roll));
    }

    #[test]
    fn test_no_commands_after_game_over() {
        let mut arrangement = GameState::arrange();
        for id in crate::core::TokenId::of_player(PlayerId::BLUE) {
            arrangement = arrangement.place(id, TokenPosition::Home);
        }
        let state = arrangement.build().unwrap();

        let rules = LudoRules;
        assert!(rules.legal_commands(&state).is_empty());
        assert_eq!(rules.is_terminal(&state), Some(PlayerId::BLUE));

        let mut dice = ScriptedDice::constant(DiceValue::SIX);
        let result = rules.apply(&state, Command::Roll, &mut dice);
        assert_eq!(result.rejection(), Some(Rejection::GameOver));
        assert!(!result.is_accepted());
    }

    #[test]
    fn test_select_through_trait() {
        let rules = LudoRules;
        let mut dice = ScriptedDice::constant(DiceValue::SIX);
        let red0 = crate::core::TokenId::for_player(PlayerId::RED, 0);

        let rolled = rules.apply(&rules.initial_state(), Command::Roll, &mut dice).state;
        let moved = rules.apply(&rolled, Command::Select(red0), &mut dice);

        assert!(moved.is_accepted());
        assert!(matches!(moved.outcome, Outcome::Moved(ref m) if m.bonus_roll));
        assert_eq!(dice.rolls(), 1);
    }
}
