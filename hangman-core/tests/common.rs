use hangman_core::{DEFAULT_WRONG_GUESSES_ALLOWED, Game, WordValidator};
use uuid::Uuid;

pub fn create_validated_game(target: &str) -> Game {
    let word = WordValidator::default()
        .validate(target)
        .expect("test target word should validate");
    Game::new(Uuid::new_v4(), word, DEFAULT_WRONG_GUESSES_ALLOWED)
}

pub fn guess_all(game: &mut Game, guesses: &[&str]) {
    for guess in guesses {
        game.apply_guess(guess).expect("guess should be accepted");
    }
}

/// Ten letters that do not occur in "elephant".
pub const MISSES: [&str; 10] = ["b", "c", "d", "f", "g", "i", "j", "k", "m", "o"];
