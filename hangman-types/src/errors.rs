use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-visible failures of the game engine. Every precondition failure
/// maps to exactly one variant so the HTTP layer can pick a status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum GameError {
    #[error("target word must be a single word without numbers or special characters")]
    InvalidWord { word: String },
    #[error("target word must be at least {minimum} characters long")]
    WordTooShort { length: usize, minimum: usize },
    #[error("a user with that name already exists: {name}")]
    UserAlreadyExists { name: String },
    #[error("a user with that name does not exist: {name}")]
    UserNotFound { name: String },
    #[error("game not found: {game_id}")]
    GameNotFound { game_id: String },
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("only single letters are allowed as guesses: {guess:?}")]
    InvalidGuess { guess: String },
    #[error("letter has previously been guessed: {letter}")]
    DuplicateGuess { letter: char },
    #[error("game {game_id} was modified by another request")]
    VersionConflict { game_id: String },
}
