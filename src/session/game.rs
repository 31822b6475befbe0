//! A running game: the current snapshot plus the dice that drive it.

use crate::core::{
    Command, DiceSource, GameConfig, GameRng, GameState, InvariantViolation, PlayerId, TokenId,
};
use crate::rules::{LudoRules, Outcome, RulesEngine, Transition};

/// Owns the current state and applies commands to it one at a time.
///
/// Every accepted command replaces the state with its successor. Earlier
/// snapshots handed out by [`Game::snapshot`] stay valid.
#[derive(Clone, Debug)]
pub struct Game<D: DiceSource = GameRng> {
    state: GameState,
    dice: D,
    rules: LudoRules,
}

impl Game<GameRng> {
    /// New game with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        GameBuilder::new().build()
    }

    /// New game with a fixed dice seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        GameBuilder::new().seed(seed).build()
    }
}

impl Default for Game<GameRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DiceSource> Game<D> {
    /// Resume from an existing snapshot.
    ///
    /// Fails if the snapshot breaks the game's structural rules.
    pub fn from_state(state: GameState, dice: D) -> Result<Self, InvariantViolation> {
        state.check_invariants()?;
        Ok(Self::resume(state, dice))
    }

    fn resume(state: GameState, dice: D) -> Self {
        Self {
            state,
            dice,
            rules: LudoRules,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state. O(1).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    #[must_use]
    pub fn rules(&self) -> &LudoRules {
        &self.rules
    }

    pub fn roll(&mut self) -> Outcome {
        self.apply(Command::Roll)
    }

    pub fn select(&mut self, token: TokenId) -> Outcome {
        self.apply(Command::Select(token))
    }

    /// Apply one command. A rejected command leaves the state as it was.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let Transition { state, outcome } = self.rules.apply(&self.state, command, &mut self.dice);
        self.state = state;
        outcome
    }

    #[must_use]
    pub fn legal_commands(&self) -> Vec<Command> {
        self.rules.legal_commands(&self.state)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.rules.is_terminal(&self.state)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Give up the game, keeping the final state and the dice.
    pub fn into_parts(self) -> (GameState, D) {
        (self.state, self.dice)
    }
}

/// Builder for new games.
///
/// ```
/// use ludo_engine::session::GameBuilder;
///
/// let mut game = GameBuilder::new().seed(42).record_history(false).build();
/// game.roll();
/// assert!(game.state().last_roll().is_some());
/// assert!(game.state().history().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn record_history(mut self, record: bool) -> Self {
        self.config.record_history = record;
        self
    }

    /// Build a game rolling seeded ChaCha dice.
    pub fn build(self) -> Game<GameRng> {
        let dice = self.config.rng();
        self.build_with_dice(dice)
    }

    /// Build a game rolling the given dice. The configured seed is ignored.
    pub fn build_with_dice<D: DiceSource>(self, dice: D) -> Game<D> {
        let state = GameState::initial().with_history(self.config.record_history);
        Game::resume(state, dice)
    }
}
