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
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::UserId).uuid().not_null())
                    .col(ColumnDef::new(Games::TargetWord).string().not_null())
                    .col(
                        ColumnDef::new(Games::CorrectLettersGuessed)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::TargetWordProgress)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::WrongGuessesAllowed)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::WrongGuessesRemaining)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::GuessHistory).text().not_null())
                    .col(ColumnDef::new(Games::Status).string().not_null())
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_user_id")
                            .from(Games::Table, Games::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_user_id")
                    .table(Games::Table)
                    .col(Games::UserId)
                    .to_owned(),
            )
            .await?;

        // The average-wrong-guesses cache scans in-progress games
        manager
            .create_index(
                Index::create()
                    .name("idx_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Games {
    Table,
    Id,
    UserId,
    TargetWord,
    CorrectLettersGuessed,
    TargetWordProgress,
    WrongGuessesAllowed,
    WrongGuessesRemaining,
    GuessHistory,
    Status,
    Version,
    CreatedAt,
}
