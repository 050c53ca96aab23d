use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Scores::UserId).uuid().not_null())
                    .col(ColumnDef::new(Scores::Date).date().not_null())
                    .col(ColumnDef::new(Scores::Won).boolean().not_null())
                    .col(ColumnDef::new(Scores::WrongGuesses).integer().not_null())
                    .col(ColumnDef::new(Scores::FinalScore).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_user_id")
                            .from(Scores::Table, Scores::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_user_id")
                    .table(Scores::Table)
                    .col(Scores::UserId)
                    .to_owned(),
            )
            .await?;

        // High-score queries order by final_score
        manager
            .create_index(
                Index::create()
                    .name("idx_scores_final_score")
                    .table(Scores::Table)
                    .col(Scores::FinalScore)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    UserId,
    Date,
    Won,
    WrongGuesses,
    FinalScore,
}
