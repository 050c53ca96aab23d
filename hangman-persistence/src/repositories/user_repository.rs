use anyhow::Result;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use hangman_types::User;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            wins: model.wins,
            games_played: model.games_played,
            total_score: model.total_score,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user_model = Users::find_by_id(id).one(&self.db).await?;
        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user_model = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn create_user(&self, user: User) -> Result<User> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&user.created_at)
            .unwrap_or_else(|_| chrono::Utc::now().into());

        let user_model = users::ActiveModel {
            id: ActiveValue::Set(user.id),
            name: ActiveValue::Set(user.name),
            email: ActiveValue::Set(user.email),
            wins: ActiveValue::Set(user.wins),
            games_played: ActiveValue::Set(user.games_played),
            total_score: ActiveValue::Set(user.total_score),
            created_at: ActiveValue::Set(created_at),
        };

        let saved_model = Users::insert(user_model).exec(&self.db).await?;

        // Fetch the created user
        let created_user = Users::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created user"))?;

        Ok(Self::model_to_user(created_user))
    }

    /// All users with at least one finished game, ordered by win
    /// percentage, then average score, then games played, all descending.
    /// The derived fields are not stored, so the ordering is applied in
    /// memory after the fetch.
    pub async fn rankings(&self) -> Result<Vec<User>> {
        let models = Users::find()
            .filter(users::Column::GamesPlayed.gt(0))
            .all(&self.db)
            .await?;

        let mut users: Vec<User> = models.into_iter().map(Self::model_to_user).collect();
        users.sort_by(|a, b| {
            b.win_percentage()
                .total_cmp(&a.win_percentage())
                .then(b.average_score().total_cmp(&a.average_score()))
                .then(b.games_played.cmp(&a.games_played))
        });

        Ok(users)
    }
}

/// Fold a finished game into the owning user's aggregates. Runs on any
/// connection so the finalize transaction can pass its own handle.
pub async fn apply_game_result<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    won: bool,
    final_score: i32,
) -> Result<()> {
    let user = Users::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

    let updated_user = users::ActiveModel {
        id: ActiveValue::Unchanged(user.id),
        name: ActiveValue::Unchanged(user.name),
        email: ActiveValue::Unchanged(user.email),
        wins: ActiveValue::Set(user.wins + i32::from(won)),
        games_played: ActiveValue::Set(user.games_played + 1),
        total_score: ActiveValue::Set(user.total_score + if won { final_score } else { 0 }),
        created_at: ActiveValue::Unchanged(user.created_at),
    };

    Users::update(updated_user).exec(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};
    use uuid::Uuid;

    async fn setup_test_db() -> UserRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    fn test_user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: Some(format!("{name}@example.com")),
            wins: 0,
            games_played: 0,
            total_score: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = setup_test_db().await;

        let user = test_user("alice");
        let user_id = user.id;

        let created = repo.create_user(user.clone()).await.unwrap();
        assert_eq!(created.name, "alice");
        assert_eq!(created.email, user.email);

        let found = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(found.name, "alice");

        let found_by_name = repo.find_by_name("alice").await.unwrap().unwrap();
        assert_eq!(found_by_name.id, user_id);

        assert!(repo.find_by_name("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected_by_unique_index() {
        let repo = setup_test_db().await;

        repo.create_user(test_user("alice")).await.unwrap();
        let result = repo.create_user(test_user("alice")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_apply_game_result_win_and_loss() {
        let repo = setup_test_db().await;

        let user = test_user("alice");
        let user_id = user.id;
        repo.create_user(user).await.unwrap();

        apply_game_result(&repo.db, user_id, true, 8).await.unwrap();
        apply_game_result(&repo.db, user_id, false, 0).await.unwrap();

        let updated = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(updated.wins, 1);
        assert_eq!(updated.games_played, 2);
        assert_eq!(updated.total_score, 8);
    }

    #[tokio::test]
    async fn test_rankings_order_and_filter() {
        let repo = setup_test_db().await;

        // alice: 2/2 wins, 16 points. bob: 1/2 wins, 9 points.
        // carol has never finished a game and must not appear.
        let mut alice = test_user("alice");
        alice.wins = 2;
        alice.games_played = 2;
        alice.total_score = 16;

        let mut bob = test_user("bob");
        bob.wins = 1;
        bob.games_played = 2;
        bob.total_score = 9;

        let carol = test_user("carol");

        for user in [alice, bob, carol] {
            repo.create_user(user).await.unwrap();
        }

        let rankings = repo.rankings().await.unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].name, "alice");
        assert_eq!(rankings[1].name, "bob");
    }

    #[tokio::test]
    async fn test_rankings_tie_broken_by_average_score() {
        let repo = setup_test_db().await;

        // Same win percentage; bob has the higher average score.
        let mut alice = test_user("alice");
        alice.wins = 1;
        alice.games_played = 2;
        alice.total_score = 5;

        let mut bob = test_user("bob");
        bob.wins = 1;
        bob.games_played = 2;
        bob.total_score = 9;

        for user in [alice, bob] {
            repo.create_user(user).await.unwrap();
        }

        let rankings = repo.rankings().await.unwrap();
        assert_eq!(rankings[0].name, "bob");
        assert_eq!(rankings[1].name, "alice");
    }
}
