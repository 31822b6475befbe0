//! Dice and deterministic random number generation.
//!
//! The engine never draws randomness itself: every roll goes through a
//! [`DiceSource`]. Two sources ship with the crate:
//!
//! - [`GameRng`]: ChaCha8-backed, seeded, checkpointable
//! - [`ScriptedDice`]: a fixed face sequence for reproducible scenarios
//!
//! ```
//! use ludo_engine::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! // Same seed, same rolls
//! for _ in 0..20 {
//!     assert_eq!(a.roll(), b.roll());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single die face, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    pub const SIX: DiceValue = DiceValue(6);

    #[must_use]
    pub const fn new(face: u8) -> Option<Self> {
        if face >= 1 && face <= 6 {
            Some(Self(face))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Sixes release tokens from base and earn a bonus roll.
    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = DiceError;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        Self::new(face).ok_or(DiceError::OutOfRange(face))
    }
}

impl From<DiceValue> for u8 {
    fn from(value: DiceValue) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("die face {0} is outside 1..=6")]
    OutOfRange(u8),
    #[error("a scripted die needs at least one face")]
    EmptyScript,
}

/// Injected randomness: produce a face uniformly distributed in `1..=6`.
pub trait DiceSource {
    fn roll(&mut self) -> DiceValue;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self) -> DiceValue {
        (**self).roll()
    }
}

/// Deterministic RNG for dice rolls.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
/// Its position can be captured and restored for replays.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self) -> DiceValue {
        DiceValue(self.inner.gen_range(1..=6))
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// A die that replays a fixed sequence of faces, wrapping around at the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<DiceValue>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Result<Self, DiceError> {
        let faces = faces
            .into_iter()
            .map(DiceValue::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if faces.is_empty() {
            return Err(DiceError::EmptyScript);
        }
        Ok(Self { faces, cursor: 0 })
    }

    /// A die that always shows `face`.
    #[must_use]
    pub fn constant(face: DiceValue) -> Self {
        Self {
            faces: vec![face],
            cursor: 0,
        }
    }

    /// Number of rolls made so far.
    #[must_use]
    pub fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DiceValue {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}
