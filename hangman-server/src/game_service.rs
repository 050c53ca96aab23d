use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::stats_cache::{AVERAGE_WRONG_GUESSES_REMAINING, StatsCache};
use hangman_core::{Game, Outcome, WordValidator};
use hangman_persistence::repositories::{GameRepository, ScoreRepository, UserRepository};
use hangman_types::{GameError, GameState, GameView, GuessRecord, Score, ScoreView, User, UserView};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A caller-visible engine error; the HTTP layer maps the variant to a
    /// status code.
    #[error(transparent)]
    Game(#[from] GameError),
    /// Anything the caller cannot fix, surfaced as a 500.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// The engine facade the routes call. Owns the orchestration order: look
/// up entities, run the state machine, persist through the repositories,
/// and dispatch the cache refresh out of the request path.
pub struct GameService {
    users: Arc<UserRepository>,
    games: Arc<GameRepository>,
    scores: Arc<ScoreRepository>,
    stats_cache: Arc<StatsCache>,
    word_validator: WordValidator,
    wrong_guesses_allowed: i32,
}

impl GameService {
    pub fn new(
        users: Arc<UserRepository>,
        games: Arc<GameRepository>,
        scores: Arc<ScoreRepository>,
        stats_cache: Arc<StatsCache>,
        config: &Config,
    ) -> Self {
        Self {
            users,
            games,
            scores,
            stats_cache,
            word_validator: WordValidator::new(config.min_target_word_length),
            wrong_guesses_allowed: config.wrong_guesses_allowed,
        }
    }

    async fn require_user_by_name(&self, name: &str) -> Result<User, ServiceError> {
        let user = self.users.find_by_name(name).await?.ok_or_else(|| {
            GameError::UserNotFound {
                name: name.to_string(),
            }
        })?;
        Ok(user)
    }

    async fn require_game(&self, game_id: Uuid) -> Result<GameState, ServiceError> {
        let state = self.games.find_by_id(game_id).await?.ok_or_else(|| {
            GameError::GameNotFound {
                game_id: game_id.to_string(),
            }
        })?;
        Ok(state)
    }

    /// Owner lookup for a loaded game. A missing owner is data corruption,
    /// not a caller mistake.
    async fn game_owner(&self, state: &GameState) -> Result<User, ServiceError> {
        let user = self.users.find_by_id(state.user_id).await?.ok_or_else(|| {
            anyhow::anyhow!("game {} references missing user {}", state.id, state.user_id)
        })?;
        Ok(user)
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        email: Option<String>,
    ) -> Result<User, ServiceError> {
        if self.users.find_by_name(user_name).await?.is_some() {
            return Err(GameError::UserAlreadyExists {
                name: user_name.to_string(),
            }
            .into());
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user_name.to_string(),
            email,
            wins: 0,
            games_played: 0,
            total_score: 0,
            created_at: Utc::now().to_rfc3339(),
        };

        let created = self.users.create_user(user).await?;
        info!(user = %created.name, "user created");
        Ok(created)
    }

    pub async fn create_game(
        &self,
        user_name: &str,
        target_word: &str,
    ) -> Result<GameView, ServiceError> {
        let user = self.require_user_by_name(user_name).await?;
        let word = self.word_validator.validate(target_word)?;

        let game = Game::new(user.id, word, self.wrong_guesses_allowed);
        self.games.create_game(&game.state).await?;
        info!(game_id = %game.state.id, user = %user.name, "new game created");

        // Refresh the reporting aggregate without holding up the response
        let games = self.games.clone();
        let cache = self.stats_cache.clone();
        tokio::spawn(async move {
            cache.recompute_average_wrong_guesses_remaining(&games).await;
        });

        Ok(game.state.to_view(&user.name, "Good luck playing Hangman!"))
    }

    pub async fn get_game(&self, game_id: Uuid) -> Result<GameView, ServiceError> {
        let state = self.require_game(game_id).await?;
        let user = self.game_owner(&state).await?;

        let message = if state.is_over() {
            "Game is over!"
        } else {
            "Time to guess a letter!"
        };
        Ok(state.to_view(&user.name, message))
    }

    /// Apply one guess to a game. Terminal moves are settled through the
    /// transactional finalize; everything else is a plain versioned write.
    pub async fn apply_guess(&self, game_id: Uuid, guess: &str) -> Result<GameView, ServiceError> {
        let state = self.require_game(game_id).await?;
        let user = self.game_owner(&state).await?;

        let mut game = Game::from_state(state);
        let outcome = game.apply_guess(guess)?;

        let stored = if game.state.is_over() {
            let settlement = Outcome::from_game(&game.state)
                .ok_or_else(|| anyhow::anyhow!("terminal game without a settled outcome"))?;
            let score = settlement.into_score(user.id, Utc::now().date_naive());
            self.games
                .finalize_game(&game.state, &score)
                .await?
                .is_some()
        } else {
            self.games.update_game(&game.state).await?.is_some()
        };

        if !stored {
            return Err(GameError::VersionConflict {
                game_id: game_id.to_string(),
            }
            .into());
        }

        Ok(game.state.to_view(&user.name, outcome.message))
    }

    /// Cancel (delete) a game. Only non-terminal games may be cancelled.
    pub async fn cancel_game(&self, game_id: Uuid) -> Result<(), ServiceError> {
        let state = self.require_game(game_id).await?;
        if state.is_over() {
            return Err(GameError::GameAlreadyOver.into());
        }

        if !self.games.delete_game(game_id).await? {
            return Err(GameError::GameNotFound {
                game_id: game_id.to_string(),
            }
            .into());
        }

        info!(game_id = %game_id, "game cancelled");
        Ok(())
    }

    pub async fn game_history(&self, game_id: Uuid) -> Result<Vec<GuessRecord>, ServiceError> {
        let state = self.require_game(game_id).await?;
        Ok(state.guess_history)
    }

    pub async fn user_games(
        &self,
        user_name: &str,
        only_in_progress: bool,
    ) -> Result<Vec<GameView>, ServiceError> {
        let user = self.require_user_by_name(user_name).await?;
        let games = self.games.list_by_user(user.id, only_in_progress).await?;

        Ok(games
            .iter()
            .map(|state| state.to_view(&user.name, "Active game"))
            .collect())
    }

    pub async fn all_scores(&self) -> Result<Vec<ScoreView>, ServiceError> {
        let scores = self.scores.list_all().await?;
        self.score_views(scores).await
    }

    pub async fn user_scores(&self, user_name: &str) -> Result<Vec<ScoreView>, ServiceError> {
        let user = self.require_user_by_name(user_name).await?;
        let scores = self.scores.list_by_user(user.id).await?;

        Ok(scores
            .into_iter()
            .map(|score| score.to_view(&user.name))
            .collect())
    }

    pub async fn high_scores(&self, limit: u64) -> Result<Vec<ScoreView>, ServiceError> {
        let scores = self.scores.high_scores(limit).await?;
        self.score_views(scores).await
    }

    pub async fn rankings(&self) -> Result<Vec<UserView>, ServiceError> {
        let users = self.users.rankings().await?;
        Ok(users.iter().map(UserView::from).collect())
    }

    /// The cached reporting aggregate; empty until the first recompute has
    /// seen an in-progress game.
    pub async fn average_wrong_guesses_remaining(&self) -> String {
        self.stats_cache
            .get(AVERAGE_WRONG_GUESSES_REMAINING)
            .await
            .unwrap_or_default()
    }

    async fn score_views(&self, scores: Vec<Score>) -> Result<Vec<ScoreView>, ServiceError> {
        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(scores.len());

        for score in scores {
            let name = match names.get(&score.user_id) {
                Some(name) => name.clone(),
                None => {
                    let user = self.users.find_by_id(score.user_id).await?.ok_or_else(|| {
                        anyhow::anyhow!(
                            "score {} references missing user {}",
                            score.id,
                            score.user_id
                        )
                    })?;
                    names.insert(score.user_id, user.name.clone());
                    user.name
                }
            };
            views.push(score.to_view(&name));
        }

        Ok(views)
    }
}
