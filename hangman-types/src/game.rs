use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type GameId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,  // Progress string reached the target word
    Lost, // Wrong guesses exhausted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessResult {
    Correct,
    Wrong,
}

/// One accepted move. The history is append-only; rejected guesses never
/// produce a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: char,
    pub result: GuessResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,
    pub user_id: Uuid,
    pub target_word: String, // Hidden from clients
    pub correct_letters_guessed: Vec<char>,
    pub target_word_progress: String,
    pub wrong_guesses_allowed: i32,
    pub wrong_guesses_remaining: i32,
    pub guess_history: Vec<GuessRecord>,
    pub status: GameStatus,
    pub version: i32, // Optimistic concurrency token, bumped on every persisted write
    pub created_at: String, // ISO 8601 string
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Build the outbound view for this game. The target word itself never
    /// leaves the server, only its length and the masked progress string.
    pub fn to_view(&self, user_name: &str, message: impl Into<String>) -> GameView {
        GameView {
            id: self.id,
            user_name: user_name.to_string(),
            target_word_length: self.target_word.chars().count() as i32,
            target_word_progress: self.target_word_progress.clone(),
            wrong_guesses_remaining: self.wrong_guesses_remaining,
            game_over: self.is_over(),
            message: message.into(),
        }
    }
}

/// Safe representation of a game for HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    pub user_name: String,
    pub target_word_length: i32,
    pub target_word_progress: String,
    pub wrong_guesses_remaining: i32,
    pub game_over: bool,
    pub message: String,
}
