use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub games_played: i32,
    pub total_score: i32,
    pub created_at: String, // ISO 8601 string
}

impl User {
    pub fn win_percentage(&self) -> f64 {
        if self.games_played > 0 {
            f64::from(self.wins) / f64::from(self.games_played)
        } else {
            0.0
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played > 0 {
            f64::from(self.total_score) / f64::from(self.games_played)
        } else {
            0.0
        }
    }

    /// Record a won game. `final_score` is the wrong guesses the player
    /// still had in hand at the moment of winning.
    pub fn record_win(&mut self, final_score: i32) {
        self.wins += 1;
        self.games_played += 1;
        self.total_score += final_score;
    }

    pub fn record_loss(&mut self) {
        self.games_played += 1;
    }
}

/// Outbound user representation, carrying the derived aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub games_played: i32,
    pub total_score: i32,
    pub win_percentage: f64,
    pub average_score: f64,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        UserView {
            name: user.name.clone(),
            email: user.email.clone(),
            wins: user.wins,
            games_played: user.games_played,
            total_score: user.total_score,
            win_percentage: user.win_percentage(),
            average_score: user.average_score(),
        }
    }
}
