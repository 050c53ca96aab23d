use chrono::NaiveDate;
use hangman_types::{GameState, GameStatus, Score, User};
use uuid::Uuid;

/// Settlement figures captured from a terminal game. The persistence layer
/// turns one of these into a Score row and a user-aggregate update inside
/// a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub won: bool,
    pub wrong_guesses: i32,
    pub final_score: i32,
}

impl Outcome {
    /// Capture the outcome of a finished game. Returns `None` while the
    /// game is still in progress.
    pub fn from_game(state: &GameState) -> Option<Outcome> {
        let won = match state.status {
            GameStatus::Won => true,
            GameStatus::Lost => false,
            GameStatus::InProgress => return None,
        };

        Some(Outcome {
            won,
            wrong_guesses: state.wrong_guesses_allowed - state.wrong_guesses_remaining,
            final_score: state.wrong_guesses_remaining,
        })
    }

    pub fn into_score(self, user_id: Uuid, date: NaiveDate) -> Score {
        Score {
            id: Uuid::new_v4(),
            user_id,
            date,
            won: self.won,
            wrong_guesses: self.wrong_guesses,
            final_score: self.final_score,
        }
    }

    /// Fold this outcome into the owning user's aggregates.
    pub fn apply_to_user(&self, user: &mut User) {
        if self.won {
            user.record_win(self.final_score);
        } else {
            user.record_loss();
        }
    }
}
