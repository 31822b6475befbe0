//! Commands and the event log.
//!
//! A [`Command`] is what a player asks the engine to do. A [`GameEvent`] is
//! what actually happened; accepted commands produce one or more events,
//! which the state records as [`EventRecord`]s when history is enabled.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::rng::DiceValue;
use super::token::{TokenId, TokenPosition};

/// A player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Roll the die.
    Roll,
    /// Move the given token by the pending roll.
    Select(TokenId),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Roll => f.write_str("roll"),
            Command::Select(id) => write!(f, "select {id}"),
        }
    }
}

/// Something that happened during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    Rolled {
        player: PlayerId,
        dice: DiceValue,
        playable: u8,
    },
    /// The roll left no legal move.
    NoMoves { player: PlayerId, dice: DiceValue },
    /// A token left base onto its entry square.
    Entered { token: TokenId },
    Advanced {
        token: TokenId,
        from: TokenPosition,
        to: TokenPosition,
    },
    ReachedHome { token: TokenId },
    Captured { by: TokenId, victim: TokenId },
    BonusRoll { player: PlayerId },
    TurnPassed { from: PlayerId, to: PlayerId },
    Won { player: PlayerId },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Rolled { player, dice, playable } => {
                write!(f, "{player} rolled {dice} ({playable} playable)")
            }
            GameEvent::NoMoves { player, dice } => write!(f, "{player} has no move for {dice}"),
            GameEvent::Entered { token } => write!(f, "{token} entered the board"),
            GameEvent::Advanced { token, from, to } => write!(f, "{token} moved {from} -> {to}"),
            GameEvent::ReachedHome { token } => write!(f, "{token} reached home"),
            GameEvent::Captured { by, victim } => write!(f, "{by} captured {victim}"),
            GameEvent::BonusRoll { player } => write!(f, "{player} earned a bonus roll"),
            GameEvent::TurnPassed { from, to } => write!(f, "turn passed {from} -> {to}"),
            GameEvent::Won { player } => write!(f, "{player} won"),
        }
    }
}

/// A recorded event with ordering metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number when the event happened.
    pub turn: u32,

    /// Position in the whole game's event sequence.
    pub sequence: u32,

    pub event: GameEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(turn: u32, sequence: u32, event: GameEvent) -> Self {
        Self {
            turn,
            sequence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let token = TokenId::for_player(PlayerId::RED, 1);
        let event = GameEvent::Advanced {
            token,
            from: TokenPosition::Active { step: 3 },
            to: TokenPosition::Active { step: 8 },
        };
        assert_eq!(event.to_string(), "RED#1 moved step 3 -> step 8");

        let victim = TokenId::for_player(PlayerId::BLUE, 0);
        assert_eq!(
            GameEvent::Captured { by: token, victim }.to_string(),
            "RED#1 captured BLUE#0"
        );
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Roll.to_string(), "roll");
        let id = TokenId::for_player(PlayerId::GREEN, 3);
        assert_eq!(Command::Select(id).to_string(), "select GREEN#3");
    }

    #[test]
    fn test_event_record_serialization() {
        let record = EventRecord::new(
            4,
            17,
            GameEvent::Rolled {
                player: PlayerId::YELLOW,
                dice: DiceValue::SIX,
                playable: 2,
            },
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: EventRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
