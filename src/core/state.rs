//! Game state snapshots.
//!
//! ## GameState
//!
//! An immutable value describing one moment of a game:
//! - All sixteen tokens, ordered by id
//! - Whose turn it is and what they may do next ([`TurnPhase`])
//! - The last roll and a status line for display
//! - An optional event history
//!
//! Storage uses `im` persistent structures, so a clone is O(1) and old
//! snapshots stay valid while the engine produces new ones. Only the rules
//! module produces successor states; everyone else reads.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::action::{EventRecord, GameEvent};
use super::player::{PlayerId, PlayerMap};
use super::rng::DiceValue;
use super::token::{
    Token, TokenId, TokenPosition, LAST_ACTIVE_STEP, TOKENS_PER_PLAYER, TOKEN_COUNT,
};
use crate::board::{coordinate_of, Coord};

/// Token ids a roll made movable. At most one player's four tokens.
pub type Playable = SmallVec<[TokenId; TOKENS_PER_PLAYER]>;

/// Where the turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The current player may roll.
    AwaitingRoll,
    /// The roll is resolved; the current player picks one of `playable`.
    AwaitingSelection { dice: DiceValue, playable: Playable },
    /// Terminal. No further commands are accepted.
    GameOver { winner: PlayerId },
}

/// Per-player token counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    pub base: u8,
    pub active: u8,
    pub home: u8,
}

/// A state that breaks the game's structural rules.
///
/// The engine never produces one; these come from hand-built or
/// deserialized states, or from bugs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("expected {expected} tokens, found {found}", expected = TOKEN_COUNT)]
    TokenCount { found: usize },
    #[error("token at index {index} has id {found}")]
    TokenOrder { index: usize, found: TokenId },
    #[error("unknown player id {0}")]
    UnknownPlayer(u8),
    #[error("unknown token id {0}")]
    UnknownToken(u8),
    #[error("step index {0} is outside -1..=56")]
    StepOutOfRange(i8),
    #[error("active step {step} is past step {last}", last = LAST_ACTIVE_STEP)]
    ActiveStepOutOfRange { step: u8 },
    #[error("{token} stands on active step {step}, past step {last}", last = LAST_ACTIVE_STEP)]
    TokenStepOutOfRange { token: TokenId, step: u8 },
    #[error("awaiting a selection with nothing playable")]
    EmptySelection,
    #[error("{token} is listed as playable more than once")]
    DuplicatePlayable { token: TokenId },
    #[error("{token} is playable but belongs to {owner}, not {current}")]
    PlayableNotOwned {
        token: TokenId,
        owner: PlayerId,
        current: PlayerId,
    },
    #[error("{token} is playable but cannot move {dice}")]
    PlayableNotEligible { token: TokenId, dice: DiceValue },
    #[error("{0} is declared winner without every token home")]
    WinnerIncomplete(PlayerId),
    #[error("{0} has every token home but the game is not over")]
    UndeclaredWinner(PlayerId),
    #[error("more than one player has every token home")]
    MultipleWinners,
}

/// One snapshot of a game.
///
/// Deserialized snapshots pass [`GameState::check_invariants`] or fail to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    tokens: Vector<Token>,
    current_player: PlayerId,
    phase: TurnPhase,
    /// Display only; survives turn changes.
    last_roll: Option<DiceValue>,
    status: String,
    /// Starts at 1, bumped whenever the current player changes.
    turn_number: u32,
    record_history: bool,
    history: Vector<EventRecord>,
    next_sequence: u32,
}

impl GameState {
    /// Fresh game: every token in base, first player to roll.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            tokens: TokenId::all().map(Token::new).collect(),
            current_player: PlayerId::RED,
            phase: TurnPhase::AwaitingRoll,
            last_roll: None,
            status: messages::opening(),
            turn_number: 1,
            record_history: true,
            history: Vector::new(),
            next_sequence: 0,
        }
    }

    /// Turn event recording on or off.
    #[must_use]
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        if !record {
            self.history = Vector::new();
        }
        self
    }

    /// Start building a mid-game position.
    #[must_use]
    pub fn arrange() -> Arrangement {
        Arrangement::new()
    }

    // === Tokens ===

    #[must_use]
    pub fn tokens(&self) -> &Vector<Token> {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn tokens_of(&self, player: PlayerId) -> impl Iterator<Item = &Token> {
        TokenId::of_player(player).map(move |id| self.token(id))
    }

    /// Grid cell of a token on the board, `None` while in base.
    #[must_use]
    pub fn coordinate_of_token(&self, id: TokenId) -> Option<Coord> {
        let token = self.token(id);
        match token.position {
            TokenPosition::Base => None,
            position => Some(coordinate_of(token.owner(), position.step_index())),
        }
    }

    /// Tokens on the board grouped by grid cell.
    ///
    /// Renderers use this to fan out stacked tokens. Base tokens are left out.
    #[must_use]
    pub fn occupancy(&self) -> FxHashMap<Coord, SmallVec<[TokenId; 4]>> {
        let mut cells: FxHashMap<Coord, SmallVec<[TokenId; 4]>> = FxHashMap::default();
        for token in &self.tokens {
            if let Some(coord) = self.coordinate_of_token(token.id) {
                cells.entry(coord).or_default().push(token.id);
            }
        }
        cells
    }

    /// Ids of the tokens standing on `coord`, in id order.
    #[must_use]
    pub fn occupants_at(&self, coord: Coord) -> SmallVec<[TokenId; 4]> {
        self.tokens
            .iter()
            .filter(|t| self.coordinate_of_token(t.id) == Some(coord))
            .map(|t| t.id)
            .collect()
    }

    #[must_use]
    pub fn progress(&self) -> PlayerMap<Progress> {
        let mut map: PlayerMap<Progress> = PlayerMap::with_default();
        for token in &self.tokens {
            let entry = &mut map[token.owner()];
            match token.position {
                TokenPosition::Base => entry.base += 1,
                TokenPosition::Active { .. } => entry.active += 1,
                TokenPosition::Home => entry.home += 1,
            }
        }
        map
    }

    /// Has every one of `player`'s tokens reached Home?
    #[must_use]
    pub fn all_home(&self, player: PlayerId) -> bool {
        self.tokens_of(player).all(Token::completed)
    }

    // === Turn ===

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn roll_allowed(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitingRoll)
    }

    /// The roll waiting for a token selection, if any.
    #[must_use]
    pub fn pending_dice_value(&self) -> Option<DiceValue> {
        match self.phase {
            TurnPhase::AwaitingSelection { dice, .. } => Some(dice),
            _ => None,
        }
    }

    /// Tokens the current player may select. Empty unless awaiting a selection.
    #[must_use]
    pub fn playable_token_ids(&self) -> &[TokenId] {
        match &self.phase {
            TurnPhase::AwaitingSelection { playable, .. } => playable.as_slice(),
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_playable(&self, id: TokenId) -> bool {
        self.playable_token_ids().contains(&id)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<DiceValue> {
        self.last_roll
    }

    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === History ===

    #[must_use]
    pub fn records_history(&self) -> bool {
        self.record_history
    }

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    // === Validation ===

    /// Check every structural invariant of the snapshot.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.tokens.len() != TOKEN_COUNT {
            return Err(InvariantViolation::TokenCount {
                found: self.tokens.len(),
            });
        }
        for (index, token) in self.tokens.iter().enumerate() {
            if token.id.index() != index {
                return Err(InvariantViolation::TokenOrder {
                    index,
                    found: token.id,
                });
            }
            if let TokenPosition::Active { step } = token.position {
                if step > LAST_ACTIVE_STEP {
                    return Err(InvariantViolation::TokenStepOutOfRange {
                        token: token.id,
                        step,
                    });
                }
            }
        }

        match &self.phase {
            TurnPhase::AwaitingRoll => {}
            TurnPhase::AwaitingSelection { dice, playable } => {
                if playable.is_empty() {
                    return Err(InvariantViolation::EmptySelection);
                }
                for (i, &id) in playable.iter().enumerate() {
                    if playable[..i].contains(&id) {
                        return Err(InvariantViolation::DuplicatePlayable { token: id });
                    }
                    if id.owner() != self.current_player {
                        return Err(InvariantViolation::PlayableNotOwned {
                            token: id,
                            owner: id.owner(),
                            current: self.current_player,
                        });
                    }
                    if !self.token(id).can_move(*dice) {
                        return Err(InvariantViolation::PlayableNotEligible {
                            token: id,
                            dice: *dice,
                        });
                    }
                }
            }
            TurnPhase::GameOver { winner } => {
                if !self.all_home(*winner) {
                    return Err(InvariantViolation::WinnerIncomplete(*winner));
                }
            }
        }

        let declared = self.winner();
        for player in PlayerId::all() {
            if Some(player) != declared && self.all_home(player) {
                return Err(match declared {
                    Some(_) => InvariantViolation::MultipleWinners,
                    None => InvariantViolation::UndeclaredWinner(player),
                });
            }
        }
        Ok(())
    }

    // === Transitions (rules module only) ===

    pub(crate) fn set_position(&mut self, id: TokenId, position: TokenPosition) {
        let token = self.tokens[id.index()].with_position(position);
        self.tokens.set(id.index(), token);
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    /// Hand the turn to `player`, bumping the turn counter if it changes hands.
    pub(crate) fn set_current_player(&mut self, player: PlayerId) {
        if player != self.current_player {
            self.turn_number += 1;
        }
        self.current_player = player;
    }

    pub(crate) fn set_last_roll(&mut self, dice: DiceValue) {
        self.last_roll = Some(dice);
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        if self.record_history {
            self.history
                .push_back(EventRecord::new(self.turn_number, self.next_sequence, event));
            self.next_sequence += 1;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Wire shape of [`GameState`], validated before it becomes one.
#[derive(Deserialize)]
struct GameStateRepr {
    tokens: Vector<Token>,
    current_player: PlayerId,
    phase: TurnPhase,
    last_roll: Option<DiceValue>,
    status: String,
    turn_number: u32,
    record_history: bool,
    history: Vector<EventRecord>,
    next_sequence: u32,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = InvariantViolation;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        let state = GameState {
            tokens: repr.tokens,
            current_player: repr.current_player,
            phase: repr.phase,
            last_roll: repr.last_roll,
            status: repr.status,
            turn_number: repr.turn_number,
            record_history: repr.record_history,
            history: repr.history,
            next_sequence: repr.next_sequence,
        };
        state.check_invariants()?;
        Ok(state)
    }
}

/// Builder for mid-game positions.
///
/// ```
/// use ludo_engine::core::{GameState, PlayerId, TokenId, TokenPosition};
///
/// let red0 = TokenId::for_player(PlayerId::RED, 0);
/// let state = GameState::arrange()
///     .place(red0, TokenPosition::Active { step: 54 })
///     .build()
///     .unwrap();
///
/// assert_eq!(state.token(red0).step_index(), 54);
/// assert!(state.roll_allowed());
/// ```
#[derive(Clone, Debug)]
pub struct Arrangement {
    tokens: [Token; TOKEN_COUNT],
    current_player: PlayerId,
    record_history: bool,
}

impl Arrangement {
    fn new() -> Self {
        Self {
            tokens: std::array::from_fn(|i| {
                let owner = PlayerId::new((i / TOKENS_PER_PLAYER) as u8);
                Token::new(TokenId::for_player(owner, (i % TOKENS_PER_PLAYER) as u8))
            }),
            current_player: PlayerId::RED,
            record_history: true,
        }
    }

    #[must_use]
    pub fn place(mut self, id: TokenId, position: TokenPosition) -> Self {
        self.tokens[id.index()] = Token { id, position };
        self
    }

    /// Place a token by flat step index (`-1` for base, `56` for Home).
    pub fn place_step(self, id: TokenId, step_index: i8) -> Result<Self, InvariantViolation> {
        Ok(self.place(id, TokenPosition::from_step_index(step_index)?))
    }

    #[must_use]
    pub fn current_player(mut self, player: PlayerId) -> Self {
        self.current_player = player;
        self
    }

    #[must_use]
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Produce the position, awaiting a roll from the current player.
    ///
    /// If one player already has every token home the game is over with
    /// that player as winner and to move.
    pub fn build(self) -> Result<GameState, InvariantViolation> {
        let mut state = GameState {
            tokens: self.tokens.into_iter().collect(),
            current_player: self.current_player,
            phase: TurnPhase::AwaitingRoll,
            last_roll: None,
            status: messages::turn(self.current_player),
            turn_number: 1,
            record_history: self.record_history,
            history: Vector::new(),
            next_sequence: 0,
        };

        let mut finished = PlayerId::all().filter(|&p| state.all_home(p));
        if let Some(winner) = finished.next() {
            if finished.next().is_some() {
                return Err(InvariantViolation::MultipleWinners);
            }
            state.current_player = winner;
            state.phase = TurnPhase::GameOver { winner };
            state.status = messages::won(winner);
        }

        state.check_invariants()?;
        Ok(state)
    }
}

/// Status line texts.
pub(crate) mod messages {
    use crate::core::{DiceValue, PlayerId};

    pub(crate) fn opening() -> String {
        "Roll the Dice!".to_string()
    }

    pub(crate) fn turn(player: PlayerId) -> String {
        format!("{player}'s Turn")
    }

    pub(crate) fn bonus(player: PlayerId) -> String {
        format!("Bonus Roll for {player}!")
    }

    pub(crate) fn rolled(player: PlayerId, dice: DiceValue) -> String {
        format!("{player} rolled a {dice}")
    }

    pub(crate) fn no_moves(player: PlayerId, dice: DiceValue, then: &str) -> String {
        format!("{player} rolled a {dice}. No moves! {then}")
    }

    pub(crate) fn won(player: PlayerId) -> String {
        format!("{player} wins!")
    }
}
