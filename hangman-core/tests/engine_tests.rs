mod common;

use common::*;
use hangman_core::{Outcome, WordValidator};
use hangman_types::{GameError, GameStatus};

#[test]
fn test_fresh_game_is_fully_masked() {
    let game = create_validated_game("elephant");
    assert_eq!(game.state.target_word_progress, "********");
    assert_eq!(game.state.wrong_guesses_remaining, 10);
    assert!(!game.state.is_over());
}

#[test]
fn test_short_target_word_is_rejected() {
    let err = WordValidator::default().validate("cat").unwrap_err();
    assert!(matches!(err, GameError::WordTooShort { length: 3, .. }));
}

#[test]
fn test_first_correct_guess() {
    let mut game = create_validated_game("elephant");
    let outcome = game.apply_guess("e").unwrap();

    assert_eq!(game.state.target_word_progress, "e*e*****");
    assert_eq!(game.state.wrong_guesses_remaining, 10);
    assert_eq!(outcome.status, GameStatus::InProgress);
}

#[test]
fn test_miss_only_costs_a_guess() {
    let mut game = create_validated_game("elephant");
    game.apply_guess("e").unwrap();
    game.apply_guess("z").unwrap();

    assert_eq!(game.state.target_word_progress, "e*e*****");
    assert_eq!(game.state.wrong_guesses_remaining, 9);
}

#[test]
fn test_full_loss_produces_zero_score_outcome() {
    let mut game = create_validated_game("elephant");
    guess_all(&mut game, &MISSES);

    assert_eq!(game.state.status, GameStatus::Lost);
    let outcome = Outcome::from_game(&game.state).unwrap();
    assert!(!outcome.won);
    assert_eq!(outcome.wrong_guesses, 10);
    assert_eq!(outcome.final_score, 0);
}

#[test]
fn test_full_win_scores_remaining_guesses() {
    let mut game = create_validated_game("elephant");
    guess_all(&mut game, &["z", "q", "e", "l", "p", "h", "a", "n", "t"]);

    assert_eq!(game.state.status, GameStatus::Won);
    assert_eq!(game.state.target_word_progress, "elephant");

    let outcome = Outcome::from_game(&game.state).unwrap();
    assert!(outcome.won);
    assert_eq!(outcome.final_score, 10 - outcome.wrong_guesses);
    assert_eq!(outcome.final_score, 8);
}

#[test]
fn test_terminal_game_stays_terminal() {
    let mut game = create_validated_game("elephant");
    guess_all(&mut game, &MISSES);

    let before = game.state.clone();
    assert_eq!(game.apply_guess("e"), Err(GameError::GameAlreadyOver));
    assert_eq!(game.state, before);
}
