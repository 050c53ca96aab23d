use chrono::Utc;
use hangman_types::{GameError, GameState, GameStatus, GuessRecord, GuessResult};
use tracing::debug;
use uuid::Uuid;

use crate::progress::render_progress;

pub const DEFAULT_WRONG_GUESSES_ALLOWED: i32 = 10;

/// Result of one accepted move: what the guess did, the status the game
/// landed in, and the message to hand back to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub result: GuessResult,
    pub status: GameStatus,
    pub message: String,
}

/// The per-game state machine. Wraps the persistable `GameState` and owns
/// the guess-application rules.
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
}

impl Game {
    /// Start a new game against `target_word`. The word must already have
    /// been checked and lowercased by `WordValidator::validate`.
    pub fn new(user_id: Uuid, target_word: String, wrong_guesses_allowed: i32) -> Self {
        let state = GameState {
            id: Uuid::new_v4(),
            user_id,
            target_word_progress: render_progress(&target_word, &[]),
            target_word,
            correct_letters_guessed: Vec::new(),
            wrong_guesses_allowed,
            wrong_guesses_remaining: wrong_guesses_allowed,
            guess_history: Vec::new(),
            status: GameStatus::InProgress,
            version: 0,
            created_at: Utc::now().to_rfc3339(),
        };

        Self { state }
    }

    /// Resume the state machine over a previously persisted game.
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Apply a single-letter guess.
    ///
    /// Preconditions are checked in order, first failure wins: the game
    /// must not be terminal, the guess must be exactly one alphabetic
    /// character, and the letter must not have been guessed before.
    /// Rejected guesses leave the state untouched.
    pub fn apply_guess(&mut self, guess: &str) -> Result<MoveOutcome, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let mut chars = guess.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_lowercase(),
            _ => {
                return Err(GameError::InvalidGuess {
                    guess: guess.to_string(),
                });
            }
        };

        // The full history is the duplicate set: a letter that was already
        // charged as wrong is rejected just like a repeated correct one.
        if self.state.guess_history.iter().any(|r| r.guess == letter) {
            return Err(GameError::DuplicateGuess { letter });
        }

        let result = if self.state.target_word.contains(letter) {
            self.state.correct_letters_guessed.push(letter);
            self.state.target_word_progress = render_progress(
                &self.state.target_word,
                &self.state.correct_letters_guessed,
            );
            GuessResult::Correct
        } else {
            self.state.wrong_guesses_remaining -= 1;
            GuessResult::Wrong
        };
        self.state.guess_history.push(GuessRecord {
            guess: letter,
            result,
        });

        let mut message = match result {
            GuessResult::Correct => "Correct letter guess!".to_string(),
            GuessResult::Wrong => "Wrong letter guess!".to_string(),
        };

        // Win is checked before loss.
        if self.state.target_word_progress == self.state.target_word {
            self.state.status = GameStatus::Won;
            message.push_str(" You win!");
            debug!(game_id = %self.state.id, "game won");
        } else if self.state.wrong_guesses_remaining < 1 {
            self.state.status = GameStatus::Lost;
            message.push_str(" Game over!");
            debug!(game_id = %self.state.id, "game lost");
        }

        Ok(MoveOutcome {
            result,
            status: self.state.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(target: &str) -> Game {
        Game::new(
            Uuid::new_v4(),
            target.to_string(),
            DEFAULT_WRONG_GUESSES_ALLOWED,
        )
    }

    #[test]
    fn test_new_game_initial_state() {
        let game = new_game("elephant");

        assert_eq!(game.state.target_word_progress, "********");
        assert_eq!(game.state.wrong_guesses_remaining, 10);
        assert_eq!(game.state.wrong_guesses_allowed, 10);
        assert!(game.state.correct_letters_guessed.is_empty());
        assert!(game.state.guess_history.is_empty());
        assert_eq!(game.state.status, GameStatus::InProgress);
        assert_eq!(game.state.version, 0);
        assert!(!game.state.is_over());
    }

    #[test]
    fn test_correct_guess_updates_progress() {
        let mut game = new_game("elephant");

        let outcome = game.apply_guess("e").unwrap();
        assert_eq!(outcome.result, GuessResult::Correct);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(outcome.message, "Correct letter guess!");

        assert_eq!(game.state.target_word_progress, "e*e*****");
        assert_eq!(game.state.wrong_guesses_remaining, 10);
        assert_eq!(game.state.correct_letters_guessed, vec!['e']);
        assert_eq!(game.state.guess_history.len(), 1);
    }

    #[test]
    fn test_wrong_guess_decrements_remaining() {
        let mut game = new_game("elephant");

        let outcome = game.apply_guess("z").unwrap();
        assert_eq!(outcome.result, GuessResult::Wrong);
        assert_eq!(outcome.message, "Wrong letter guess!");

        assert_eq!(game.state.target_word_progress, "********");
        assert_eq!(game.state.wrong_guesses_remaining, 9);
        assert!(game.state.correct_letters_guessed.is_empty());
        assert_eq!(game.state.guess_history.len(), 1);
    }

    #[test]
    fn test_guess_is_case_folded() {
        let mut game = new_game("elephant");

        game.apply_guess("E").unwrap();
        assert_eq!(game.state.target_word_progress, "e*e*****");
        assert_eq!(game.state.correct_letters_guessed, vec!['e']);
    }

    #[test]
    fn test_invalid_guesses_rejected_without_mutation() {
        let mut game = new_game("elephant");
        let before = game.state.clone();

        for guess in ["", "ab", "1", "-", " "] {
            let err = game.apply_guess(guess).unwrap_err();
            assert!(matches!(err, GameError::InvalidGuess { .. }), "{guess:?}");
        }

        assert_eq!(game.state, before);
    }

    #[test]
    fn test_duplicate_correct_guess_rejected() {
        let mut game = new_game("elephant");
        game.apply_guess("e").unwrap();
        let before = game.state.clone();

        let err = game.apply_guess("e").unwrap_err();
        assert_eq!(err, GameError::DuplicateGuess { letter: 'e' });
        // Case-folded duplicates are the same letter
        let err = game.apply_guess("E").unwrap_err();
        assert_eq!(err, GameError::DuplicateGuess { letter: 'e' });

        assert_eq!(game.state, before);
    }

    #[test]
    fn test_duplicate_wrong_guess_rejected() {
        let mut game = new_game("elephant");
        game.apply_guess("z").unwrap();
        assert_eq!(game.state.wrong_guesses_remaining, 9);

        // A previously wrong letter is not charged twice
        let err = game.apply_guess("z").unwrap_err();
        assert_eq!(err, GameError::DuplicateGuess { letter: 'z' });
        assert_eq!(game.state.wrong_guesses_remaining, 9);
    }

    #[test]
    fn test_remaining_is_monotonic_and_never_negative() {
        let mut game = new_game("elephant");
        let mut previous = game.state.wrong_guesses_remaining;

        for letter in ["q", "w", "r", "y", "u", "i", "o", "s", "d", "f"] {
            let _ = game.apply_guess(letter);
            assert!(game.state.wrong_guesses_remaining <= previous);
            assert!(game.state.wrong_guesses_remaining >= 0);
            previous = game.state.wrong_guesses_remaining;
        }

        assert_eq!(game.state.wrong_guesses_remaining, 0);
        assert_eq!(game.state.status, GameStatus::Lost);
    }

    #[test]
    fn test_win_on_full_reveal() {
        let mut game = new_game("elephant");

        for letter in ["e", "l", "p", "h", "a", "n"] {
            let outcome = game.apply_guess(letter).unwrap();
            assert_eq!(outcome.status, GameStatus::InProgress);
        }

        // "t" completes the word
        let outcome = game.apply_guess("t").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.message, "Correct letter guess! You win!");
        assert_eq!(game.state.target_word_progress, "elephant");
        assert!(game.state.is_over());
    }

    #[test]
    fn test_loss_on_exhausted_guesses() {
        let mut game = new_game("elephant");

        for letter in ["b", "c", "d", "f", "g", "i", "j", "k", "m"] {
            let outcome = game.apply_guess(letter).unwrap();
            assert_eq!(outcome.status, GameStatus::InProgress);
        }

        let outcome = game.apply_guess("o").unwrap();
        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(outcome.message, "Wrong letter guess! Game over!");
        assert_eq!(game.state.wrong_guesses_remaining, 0);
    }

    #[test]
    fn test_terminal_game_rejects_all_guesses_unchanged() {
        let mut game = new_game("elephant");
        for letter in ["e", "l", "p", "h", "a", "n", "t"] {
            game.apply_guess(letter).unwrap();
        }
        assert_eq!(game.state.status, GameStatus::Won);
        let before = game.state.clone();

        // Fresh letters, previously guessed letters, garbage: all rejected
        // with GameAlreadyOver before any other precondition runs.
        for guess in ["z", "e", "ab", ""] {
            let err = game.apply_guess(guess).unwrap_err();
            assert_eq!(err, GameError::GameAlreadyOver, "{guess:?}");
        }

        assert_eq!(game.state, before);
    }

    #[test]
    fn test_history_records_moves_in_order() {
        let mut game = new_game("elephant");
        game.apply_guess("e").unwrap();
        game.apply_guess("z").unwrap();
        game.apply_guess("l").unwrap();

        let history: Vec<(char, GuessResult)> = game
            .state
            .guess_history
            .iter()
            .map(|r| (r.guess, r.result))
            .collect();
        assert_eq!(
            history,
            vec![
                ('e', GuessResult::Correct),
                ('z', GuessResult::Wrong),
                ('l', GuessResult::Correct),
            ]
        );
    }
}
