//! Session layer: drives one game through the rules engine.

pub mod game;

pub use game::{Game, GameBuilder};
