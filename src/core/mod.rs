//! Core engine types: players, tokens, dice, commands, state, configuration.
//!
//! Everything here is plain data. The rules module is the only place that
//! turns one `GameState` into the next.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod token;

pub use action::{Command, EventRecord, GameEvent};
pub use config::GameConfig;
pub use player::{Color, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{DiceError, DiceSource, DiceValue, GameRng, GameRngState, ScriptedDice};
pub use state::{Arrangement, GameState, InvariantViolation, Playable, Progress, TurnPhase};
pub use token::{
    Lifecycle, Token, TokenId, TokenPosition, BASE_STEP_INDEX, ENTRY_STEP, HOME_STEP,
    HOME_STRETCH_START, LAST_ACTIVE_STEP, LOOP_END_STEP, PATH_LEN, TOKENS_PER_PLAYER, TOKEN_COUNT,
};
