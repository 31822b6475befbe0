//! Tokens and their positions along a player's path.
//!
//! ## ID Layout
//!
//! Sixteen tokens exist for the whole game. Ids are contiguous per player
//! in turn order: player `p` owns ids `4p..4p+3`, and `id % 4` is the
//! token's slot inside its base house.
//!
//! ## Step index
//!
//! A position is a step along the owner's 57-cell path:
//! - `-1`: Base (not yet entered)
//! - `0`: entry square
//! - `1..=50`: shared outer loop
//! - `51..=55`: private home stretch
//! - `56`: Home (terminal)
//!
//! ```
//! use ludo_engine::core::{PlayerId, TokenId, TokenPosition};
//!
//! let id = TokenId::for_player(PlayerId::GREEN, 2);
//! assert_eq!(id.raw(), 6);
//! assert_eq!(id.owner(), PlayerId::GREEN);
//!
//! assert_eq!(TokenPosition::Base.step_index(), -1);
//! assert_eq!(TokenPosition::Home.step_index(), 56);
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};
use super::rng::DiceValue;
use super::state::InvariantViolation;

pub const TOKENS_PER_PLAYER: usize = 4;
pub const TOKEN_COUNT: usize = TOKENS_PER_PLAYER * PLAYER_COUNT;

/// Number of cells on one player's path, Home included.
pub const PATH_LEN: usize = 57;
pub const ENTRY_STEP: u8 = 0;
pub const LOOP_END_STEP: u8 = 50;
pub const HOME_STRETCH_START: u8 = 51;
pub const LAST_ACTIVE_STEP: u8 = 55;
pub const HOME_STEP: u8 = 56;
/// Step index reported for tokens still in Base.
pub const BASE_STEP_INDEX: i8 = -1;

/// Unique token identifier in `0..TOKEN_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TokenId(u8);

impl TokenId {
    /// Create a token ID, or `None` if out of range.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < TOKEN_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// The id of `player`'s token in base slot `slot`.
    ///
    /// Panics if `slot >= TOKENS_PER_PLAYER`.
    #[must_use]
    pub const fn for_player(player: PlayerId, slot: u8) -> Self {
        assert!((slot as usize) < TOKENS_PER_PLAYER, "token slot out of range");
        Self((player.index() * TOKENS_PER_PLAYER) as u8 + slot)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn owner(self) -> PlayerId {
        PlayerId::new(self.0 / TOKENS_PER_PLAYER as u8)
    }

    /// Slot inside the owner's base house (0..4).
    #[must_use]
    pub const fn slot(self) -> u8 {
        self.0 % TOKENS_PER_PLAYER as u8
    }

    /// All token ids in order.
    pub fn all() -> impl Iterator<Item = TokenId> {
        (0..TOKEN_COUNT as u8).map(TokenId)
    }

    /// The four token ids owned by `player`.
    pub fn of_player(player: PlayerId) -> impl Iterator<Item = TokenId> {
        (0..TOKENS_PER_PLAYER as u8).map(move |slot| Self::for_player(player, slot))
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.owner(), self.slot())
    }
}

impl TryFrom<u8> for TokenId {
    type Error = InvariantViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvariantViolation::UnknownToken(value))
    }
}

impl From<TokenId> for u8 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

/// Where a token is, as a tagged union.
///
/// `Active` always carries a step in `0..=LAST_ACTIVE_STEP`; use
/// [`TokenPosition::active`] to construct one from untrusted input.
/// Deserialization enforces the same range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr")]
pub enum TokenPosition {
    Base,
    Active { step: u8 },
    Home,
}

/// Wire shape of [`TokenPosition`], checked on the way in.
#[derive(Deserialize)]
enum PositionRepr {
    Base,
    Active { step: u8 },
    Home,
}

impl TryFrom<PositionRepr> for TokenPosition {
    type Error = InvariantViolation;

    fn try_from(repr: PositionRepr) -> Result<Self, Self::Error> {
        match repr {
            PositionRepr::Base => Ok(TokenPosition::Base),
            PositionRepr::Active { step } => TokenPosition::active(step)
                .ok_or(InvariantViolation::ActiveStepOutOfRange { step }),
            PositionRepr::Home => Ok(TokenPosition::Home),
        }
    }
}

impl TokenPosition {
    /// Active position at `step`, or `None` if the step is off the board.
    #[must_use]
    pub const fn active(step: u8) -> Option<Self> {
        if step <= LAST_ACTIVE_STEP {
            Some(TokenPosition::Active { step })
        } else {
            None
        }
    }

    /// Convert a flat step index (`-1..=56`) into a position.
    pub fn from_step_index(index: i8) -> Result<Self, InvariantViolation> {
        match index {
            BASE_STEP_INDEX => Ok(TokenPosition::Base),
            i if i == HOME_STEP as i8 => Ok(TokenPosition::Home),
            i if (0..=LAST_ACTIVE_STEP as i8).contains(&i) => {
                Ok(TokenPosition::Active { step: i as u8 })
            }
            other => Err(InvariantViolation::StepOutOfRange(other)),
        }
    }

    /// Flat step index: `-1` for Base, `56` for Home.
    #[must_use]
    pub const fn step_index(self) -> i8 {
        match self {
            TokenPosition::Base => BASE_STEP_INDEX,
            TokenPosition::Active { step } => step as i8,
            TokenPosition::Home => HOME_STEP as i8,
        }
    }

    /// Step along the path for tokens on the board (Active or Home).
    #[must_use]
    pub const fn step(self) -> Option<u8> {
        match self {
            TokenPosition::Base => None,
            TokenPosition::Active { step } => Some(step),
            TokenPosition::Home => Some(HOME_STEP),
        }
    }

    #[must_use]
    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            TokenPosition::Base => Lifecycle::Base,
            TokenPosition::Active { .. } => Lifecycle::Active,
            TokenPosition::Home => Lifecycle::Home,
        }
    }

    /// True while on the home stretch (steps 51..=55).
    #[must_use]
    pub const fn on_home_stretch(self) -> bool {
        matches!(self, TokenPosition::Active { step } if step >= HOME_STRETCH_START)
    }
}

impl std::fmt::Display for TokenPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPosition::Base => f.write_str("base"),
            TokenPosition::Active { step } => write!(f, "step {step}"),
            TokenPosition::Home => f.write_str("home"),
        }
    }
}

/// Flat lifecycle view of a [`TokenPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    Base,
    Active,
    Home,
}

/// A single playing piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub position: TokenPosition,
}

impl Token {
    /// A fresh token in its owner's base.
    #[must_use]
    pub const fn new(id: TokenId) -> Self {
        Self {
            id,
            position: TokenPosition::Base,
        }
    }

    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.id.owner()
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.position.lifecycle()
    }

    #[must_use]
    pub const fn step_index(&self) -> i8 {
        self.position.step_index()
    }

    /// Has this token finished its path?
    #[must_use]
    pub const fn completed(&self) -> bool {
        matches!(self.position, TokenPosition::Home)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.position, TokenPosition::Active { .. })
    }

    #[must_use]
    pub const fn with_position(self, position: TokenPosition) -> Self {
        Self { id: self.id, position }
    }

    /// Where a roll of `dice` would take this token, if it may move at all.
    ///
    /// Leaving base needs a six and lands on the entry square; the rest of
    /// the roll is spent on getting out. Active tokens must not overshoot
    /// Home, and tokens already Home never move.
    #[must_use]
    pub const fn destination(&self, dice: DiceValue) -> Option<TokenPosition> {
        match self.position {
            TokenPosition::Base if dice.is_six() => Some(TokenPosition::Active { step: ENTRY_STEP }),
            TokenPosition::Base => None,
            TokenPosition::Active { step } => {
                let target = step.saturating_add(dice.get());
                if target == HOME_STEP {
                    Some(TokenPosition::Home)
                } else if target < HOME_STEP {
                    Some(TokenPosition::Active { step: target })
                } else {
                    None
                }
            }
            TokenPosition::Home => None,
        }
    }

    #[must_use]
    pub const fn can_move(&self, dice: DiceValue) -> bool {
        self.destination(dice).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_layout_is_contiguous_per_player() {
        for player in PlayerId::all() {
            let ids: Vec<u8> = TokenId::of_player(player).map(TokenId::raw).collect();
            let first = player.index() as u8 * 4;
            assert_eq!(ids, vec![first, first + 1, first + 2, first + 3]);
            for id in TokenId::of_player(player) {
                assert_eq!(id.owner(), player);
            }
        }
        assert_eq!(TokenId::all().count(), TOKEN_COUNT);
        assert!(TokenId::new(16).is_none());
    }

    #[test]
    fn test_step_index_conversion() {
        assert_eq!(TokenPosition::from_step_index(-1), Ok(TokenPosition::Base));
        assert_eq!(
            TokenPosition::from_step_index(0),
            Ok(TokenPosition::Active { step: 0 })
        );
        assert_eq!(
            TokenPosition::from_step_index(55),
            Ok(TokenPosition::Active { step: 55 })
        );
        assert_eq!(TokenPosition::from_step_index(56), Ok(TokenPosition::Home));
        assert_eq!(
            TokenPosition::from_step_index(57),
            Err(InvariantViolation::StepOutOfRange(57))
        );
        assert_eq!(
            TokenPosition::from_step_index(-2),
            Err(InvariantViolation::StepOutOfRange(-2))
        );
    }

    #[test]
    fn test_active_rejects_home_step() {
        assert!(TokenPosition::active(LAST_ACTIVE_STEP).is_some());
        assert!(TokenPosition::active(HOME_STEP).is_none());
    }

    #[test]
    fn test_lifecycle_matches_position() {
        let token = Token::new(TokenId::for_player(PlayerId::BLUE, 3));
        assert_eq!(token.lifecycle(), Lifecycle::Base);
        assert!(!token.completed());

        let active = token.with_position(TokenPosition::Active { step: 52 });
        assert_eq!(active.lifecycle(), Lifecycle::Active);
        assert!(active.position.on_home_stretch());

        let home = token.with_position(TokenPosition::Home);
        assert_eq!(home.lifecycle(), Lifecycle::Home);
        assert!(home.completed());
        assert_eq!(home.step_index(), 56);
    }

    #[test]
    fn test_destination_gating() {
        let six = DiceValue::SIX;
        let three = DiceValue::new(3).unwrap();
        let two = DiceValue::new(2).unwrap();
        let token = Token::new(TokenId::for_player(PlayerId::RED, 0));

        assert_eq!(token.destination(three), None);
        assert_eq!(token.destination(six), Some(TokenPosition::Active { step: 0 }));

        let near_home = token.with_position(TokenPosition::Active { step: 54 });
        assert_eq!(near_home.destination(three), None);
        assert_eq!(near_home.destination(two), Some(TokenPosition::Home));

        let home = token.with_position(TokenPosition::Home);
        assert!(!home.can_move(six));
    }

    #[test]
    fn test_destination_past_last_step_never_moves() {
        let token = Token::new(TokenId::for_player(PlayerId::RED, 0))
            .with_position(TokenPosition::Active { step: 250 });
        assert_eq!(token.destination(DiceValue::SIX), None);
        assert!(!token.can_move(DiceValue::new(1).unwrap()));
    }

    #[test]
    fn test_position_serde_checks_step_range() {
        let json = serde_json::to_string(&TokenPosition::Active { step: 55 }).unwrap();
        assert_eq!(json, r#"{"Active":{"step":55}}"#);
        assert_eq!(
            serde_json::from_str::<TokenPosition>(&json).unwrap(),
            TokenPosition::Active { step: 55 }
        );
        assert_eq!(
            serde_json::from_str::<TokenPosition>(r#""Home""#).unwrap(),
            TokenPosition::Home
        );

        assert!(serde_json::from_str::<TokenPosition>(r#"{"Active":{"step":56}}"#).is_err());
        assert!(serde_json::from_str::<TokenPosition>(r#"{"Active":{"step":250}}"#).is_err());
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::for_player(PlayerId::YELLOW, 1).to_string(), "YELLOW#1");
    }
}
