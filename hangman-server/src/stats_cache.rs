use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::error;

use hangman_persistence::repositories::GameRepository;

pub const AVERAGE_WRONG_GUESSES_REMAINING: &str = "average_wrong_guesses_remaining";

/// In-process cache of derived reporting aggregates, one well-known key
/// per value. The engine never reads it; recomputes are dispatched out of
/// the request path after game creation.
pub struct StatsCache {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &'static str, value: String) {
        self.entries.write().await.insert(key, value);
    }

    /// Recompute the average wrong-guesses-remaining across in-progress
    /// games. With no active games the previous value is left in place.
    pub async fn recompute_average_wrong_guesses_remaining(&self, games: &GameRepository) {
        match games.list_in_progress().await {
            Ok(active) if !active.is_empty() => {
                let total: i32 = active.iter().map(|g| g.wrong_guesses_remaining).sum();
                let average = f64::from(total) / active.len() as f64;
                self.set(
                    AVERAGE_WRONG_GUESSES_REMAINING,
                    format!("The average wrong guesses remaining is {average:.2}"),
                )
                .await;
            }
            Ok(_) => {}
            Err(err) => {
                error!("Failed to recompute average wrong guesses remaining: {err}");
            }
        }
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new()
    }
}
