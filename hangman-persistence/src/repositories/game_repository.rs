use anyhow::{Context, Result, bail};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{games, prelude::*, scores};
use crate::repositories::user_repository;
use hangman_types::{GameState, GameStatus, Score};

const STATUS_IN_PROGRESS: &str = "in_progress";
const STATUS_WON: &str = "won";
const STATUS_LOST: &str = "lost";

fn status_to_str(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => STATUS_IN_PROGRESS,
        GameStatus::Won => STATUS_WON,
        GameStatus::Lost => STATUS_LOST,
    }
}

fn status_from_str(status: &str) -> Result<GameStatus> {
    match status {
        STATUS_IN_PROGRESS => Ok(GameStatus::InProgress),
        STATUS_WON => Ok(GameStatus::Won),
        STATUS_LOST => Ok(GameStatus::Lost),
        other => bail!("unknown game status in database: {other}"),
    }
}

pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_state(model: games::Model) -> Result<GameState> {
        let guess_history = serde_json::from_str(&model.guess_history)
            .with_context(|| format!("corrupt guess history for game {}", model.id))?;

        Ok(GameState {
            id: model.id,
            user_id: model.user_id,
            target_word: model.target_word,
            correct_letters_guessed: model.correct_letters_guessed.chars().collect(),
            target_word_progress: model.target_word_progress,
            wrong_guesses_allowed: model.wrong_guesses_allowed,
            wrong_guesses_remaining: model.wrong_guesses_remaining,
            guess_history,
            status: status_from_str(&model.status)?,
            version: model.version,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    /// Active model carrying the fields a guess can change, with the
    /// version token bumped. Identity and creation-time fields are left
    /// untouched.
    fn mutable_fields(state: &GameState, next_version: i32) -> Result<games::ActiveModel> {
        let guess_history =
            serde_json::to_string(&state.guess_history).context("encode guess history")?;

        Ok(games::ActiveModel {
            correct_letters_guessed: ActiveValue::Set(
                state.correct_letters_guessed.iter().collect(),
            ),
            target_word_progress: ActiveValue::Set(state.target_word_progress.clone()),
            wrong_guesses_remaining: ActiveValue::Set(state.wrong_guesses_remaining),
            guess_history: ActiveValue::Set(guess_history),
            status: ActiveValue::Set(status_to_str(state.status).to_string()),
            version: ActiveValue::Set(next_version),
            ..Default::default()
        })
    }

    pub async fn create_game(&self, state: &GameState) -> Result<GameState> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&state.created_at)
            .unwrap_or_else(|_| chrono::Utc::now().into());
        let guess_history =
            serde_json::to_string(&state.guess_history).context("encode guess history")?;

        let game_model = games::ActiveModel {
            id: ActiveValue::Set(state.id),
            user_id: ActiveValue::Set(state.user_id),
            target_word: ActiveValue::Set(state.target_word.clone()),
            correct_letters_guessed: ActiveValue::Set(
                state.correct_letters_guessed.iter().collect(),
            ),
            target_word_progress: ActiveValue::Set(state.target_word_progress.clone()),
            wrong_guesses_allowed: ActiveValue::Set(state.wrong_guesses_allowed),
            wrong_guesses_remaining: ActiveValue::Set(state.wrong_guesses_remaining),
            guess_history: ActiveValue::Set(guess_history),
            status: ActiveValue::Set(status_to_str(state.status).to_string()),
            version: ActiveValue::Set(state.version),
            created_at: ActiveValue::Set(created_at),
        };

        let saved_model = Games::insert(game_model).exec(&self.db).await?;

        let created_game = Games::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created game"))?;

        Self::model_to_state(created_game)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GameState>> {
        let game_model = Games::find_by_id(id).one(&self.db).await?;
        game_model.map(Self::model_to_state).transpose()
    }

    /// Compare-and-swap write of a non-terminal move. Returns the state
    /// with the bumped version token, or `None` when the stored version no
    /// longer matches and the caller lost the race.
    pub async fn update_game(&self, state: &GameState) -> Result<Option<GameState>> {
        let next_version = state.version + 1;

        let result = Games::update_many()
            .set(Self::mutable_fields(state, next_version)?)
            .filter(games::Column::Id.eq(state.id))
            .filter(games::Column::Version.eq(state.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let mut stored = state.clone();
        stored.version = next_version;
        Ok(Some(stored))
    }

    /// Settle a finished game: the terminal game write, the score insert,
    /// and the user-aggregate update happen in one transaction, so either
    /// all three are visible or none are. Returns `None` when the version
    /// token no longer matches.
    pub async fn finalize_game(&self, state: &GameState, score: &Score) -> Result<Option<Score>> {
        let txn = self.db.begin().await?;

        let result = Games::update_many()
            .set(Self::mutable_fields(state, state.version + 1)?)
            .filter(games::Column::Id.eq(state.id))
            .filter(games::Column::Version.eq(state.version))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let score_model = scores::ActiveModel {
            id: ActiveValue::Set(score.id),
            user_id: ActiveValue::Set(score.user_id),
            date: ActiveValue::Set(score.date),
            won: ActiveValue::Set(score.won),
            wrong_guesses: ActiveValue::Set(score.wrong_guesses),
            final_score: ActiveValue::Set(score.final_score),
        };
        Scores::insert(score_model).exec(&txn).await?;

        user_repository::apply_game_result(&txn, score.user_id, score.won, score.final_score)
            .await?;

        txn.commit().await?;

        info!(game_id = %state.id, won = score.won, final_score = score.final_score, "game finalized");
        Ok(Some(score.clone()))
    }

    /// Delete a game. Returns false when no such game exists.
    pub async fn delete_game(&self, id: Uuid) -> Result<bool> {
        let result = Games::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_by_user(&self, user_id: Uuid, only_in_progress: bool) -> Result<Vec<GameState>> {
        let mut query = Games::find().filter(games::Column::UserId.eq(user_id));
        if only_in_progress {
            query = query.filter(games::Column::Status.eq(STATUS_IN_PROGRESS));
        }

        let models = query.all(&self.db).await?;
        models.into_iter().map(Self::model_to_state).collect()
    }

    pub async fn list_in_progress(&self) -> Result<Vec<GameState>> {
        let models = Games::find()
            .filter(games::Column::Status.eq(STATUS_IN_PROGRESS))
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_state).collect()
    }
}
