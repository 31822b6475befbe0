//! # ludo-engine
//!
//! A rules engine for classic four-player Ludo.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: Every command maps a `GameState` to a new
//!    one. Old snapshots stay valid, so a renderer can hold one while the
//!    engine moves on.
//!
//! 2. **Injected randomness**: Dice come from a `DiceSource`. Seeded ChaCha
//!    dice for play, scripted dice for tests.
//!
//! 3. **Unrepresentable bad states**: Token positions and turn phases are
//!    tagged enums, so a token cannot be "active at step -1" and a selection
//!    cannot exist without a roll.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`.
//!
//! - **Derived Topology**: One canonical path, rotated a quarter turn per
//!   player at compile time. Safe squares are read off the paths.
//!
//! ## Modules
//!
//! - `core`: Players, tokens, dice, commands, events, state, configuration
//! - `board`: Grid coordinates, player paths, safe squares, base layout
//! - `rules`: Turn engine and the `RulesEngine` trait
//! - `session`: `Game` and `GameBuilder`

pub mod board;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, Command, DiceSource, DiceValue, EventRecord, GameConfig, GameEvent, GameRng,
    GameRngState, GameState, InvariantViolation, PlayerId, PlayerMap, ScriptedDice, Token,
    TokenId, TokenPosition, TurnPhase,
};

pub use crate::board::{coordinate_of, is_safe, path_of, Coord};

pub use crate::rules::{LudoRules, MoveResolution, Outcome, Rejection, RulesEngine, Transition};

pub use crate::session::{Game, GameBuilder};
