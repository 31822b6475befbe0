//! The turn engine.
//!
//! - `turn`: rolling, selecting and handing over the turn
//! - `movement`: moving a token and resolving captures
//! - `engine`: the `RulesEngine` trait and transition results
//!
//! Every operation maps a `&GameState` to a fresh [`Transition`]. The input
//! snapshot is never touched.

pub mod engine;
pub mod movement;
pub mod turn;

pub use engine::{LudoRules, Outcome, Rejection, RulesEngine, Transition};
pub use movement::{capture_victims, trail, MoveResolution};
pub use turn::{playable_tokens, roll_dice, select_token};
