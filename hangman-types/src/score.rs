use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of a terminated game. Created exactly once per game,
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub won: bool,
    pub wrong_guesses: i32,
    pub final_score: i32,
}

impl Score {
    pub fn to_view(&self, user_name: &str) -> ScoreView {
        ScoreView {
            user_name: user_name.to_string(),
            date: self.date.to_string(),
            won: self.won,
            wrong_guesses: self.wrong_guesses,
            final_score: self.final_score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreView {
    pub user_name: String,
    pub date: String,
    pub won: bool,
    pub wrong_guesses: i32,
    pub final_score: i32,
}
