use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::{prelude::*, scores};
use hangman_types::Score;

pub struct ScoreRepository {
    db: DatabaseConnection,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_score(model: scores::Model) -> Score {
        Score {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            won: model.won,
            wrong_guesses: model.wrong_guesses,
            final_score: model.final_score,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Score>> {
        let models = Scores::find().all(&self.db).await?;
        Ok(models.into_iter().map(Self::model_to_score).collect())
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Score>> {
        let models = Scores::find()
            .filter(scores::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_score).collect())
    }

    pub async fn high_scores(&self, limit: u64) -> Result<Vec<Score>> {
        let models = Scores::find()
            .order_by_desc(scores::Column::FinalScore)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_score).collect())
    }
}
