//! Session verification tests: `Game` and `GameBuilder` end to end.

use ludo_engine::core::{
    Command, DiceValue, GameConfig, GameState, PlayerId, ScriptedDice, TokenId, TokenPosition,
};
use ludo_engine::rules::{Outcome, Rejection};
use ludo_engine::session::{Game, GameBuilder};

fn red(slot: u8) -> TokenId {
    TokenId::for_player(PlayerId::RED, slot)
}

#[test]
fn test_new_game_is_initial_state() {
    let game = Game::with_seed(3);
    assert_eq!(game.state(), &GameState::initial());
    assert_eq!(game.legal_commands(), vec![Command::Roll]);
    assert_eq!(game.winner(), None);
}

#[test]
fn test_scripted_opening() {
    let dice = ScriptedDice::new([6, 5, 1]).unwrap();
    let mut game = GameBuilder::new().build_with_dice(dice);

    let outcome = game.roll();
    assert!(matches!(outcome, Outcome::Rolled { ref playable, .. } if playable.len() == 4));
    assert_eq!(
        game.legal_commands(),
        (0..4).map(|slot| Command::Select(red(slot))).collect::<Vec<_>>()
    );

    game.select(red(1));
    assert_eq!(game.state().current_player(), PlayerId::RED);

    // 5 moves the token just out
    game.roll();
    assert_eq!(game.legal_commands(), vec![Command::Select(red(1))]);
    game.apply(Command::Select(red(1)));
    assert_eq!(game.state().token(red(1)).position, TokenPosition::Active { step: 5 });
    assert_eq!(game.state().current_player(), PlayerId::GREEN);

    // Green has nothing out, so a 1 passes straight to Yellow
    let outcome = game.roll();
    assert_eq!(
        outcome,
        Outcome::Passed {
            player: PlayerId::GREEN,
            dice: DiceValue::new(1).unwrap(),
            bonus_roll: false,
        }
    );
    assert_eq!(game.state().current_player(), PlayerId::YELLOW);
    assert_eq!(game.dice().rolls(), 3);
}

#[test]
fn test_commands_out_of_order_are_rejected() {
    let mut game = GameBuilder::new().build_with_dice(ScriptedDice::constant(DiceValue::SIX));

    assert_eq!(
        game.select(red(0)),
        Outcome::Rejected(Rejection::NotAwaitingSelection)
    );
    game.roll();
    assert_eq!(game.roll(), Outcome::Rejected(Rejection::RollNotAllowed));
    assert_eq!(game.dice().rolls(), 1);
}

#[test]
fn test_builder_history_toggle() {
    let mut quiet = GameBuilder::new().seed(5).record_history(false).build();
    let mut loud = GameBuilder::new().seed(5).build();
    for _ in 0..20 {
        let command = loud.legal_commands()[0];
        quiet.apply(command);
        loud.apply(command);
    }

    assert!(quiet.state().history().is_empty());
    assert!(!loud.state().history().is_empty());
    assert_eq!(quiet.state().tokens(), loud.state().tokens());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = GameConfig::default().with_seed(77);
    let json = serde_json::to_string(&config).unwrap();
    let restored: GameConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);

    // Missing fields fall back to defaults
    let partial: GameConfig = serde_json::from_str(r#"{"seed": 1}"#).unwrap();
    assert!(partial.record_history);

    let game = GameBuilder::new().config(restored).build();
    assert_eq!(game.dice().seed(), 77);
}

#[test]
fn test_resume_from_snapshot() {
    let state = GameState::arrange()
        .place(red(0), TokenPosition::Active { step: 54 })
        .build()
        .unwrap();
    let mut game = Game::from_state(state, ScriptedDice::new([2]).unwrap()).unwrap();

    game.roll();
    game.select(red(0));
    assert_eq!(game.state().token(red(0)).position, TokenPosition::Home);

    let (state, dice) = game.into_parts();
    assert_eq!(state.current_player(), PlayerId::GREEN);
    assert_eq!(dice.rolls(), 1);
}

#[test]
fn test_finished_game_reports_winner() {
    let mut arrangement = GameState::arrange();
    for slot in 0..3 {
        arrangement = arrangement.place(red(slot), TokenPosition::Home);
    }
    let state = arrangement
        .place(red(3), TokenPosition::Active { step: 55 })
        .build()
        .unwrap();
    let mut game = Game::from_state(state, ScriptedDice::new([1]).unwrap()).unwrap();

    game.roll();
    let outcome = game.select(red(3));

    assert!(matches!(outcome, Outcome::Moved(ref m) if m.winner == Some(PlayerId::RED)));
    assert_eq!(game.winner(), Some(PlayerId::RED));
    assert!(game.is_over());
    assert!(game.legal_commands().is_empty());
    assert_eq!(game.roll(), Outcome::Rejected(Rejection::GameOver));
}

#[test]
fn test_state_serde_mid_game() {
    let mut game = Game::with_seed(11);
    for _ in 0..50 {
        let command = game.legal_commands()[0];
        game.apply(command);
    }

    let json = serde_json::to_string(game.state()).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, game.state());
    assert_eq!(restored.check_invariants(), Ok(()));
}
