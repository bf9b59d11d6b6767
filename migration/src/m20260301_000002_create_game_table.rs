use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(pk_auto(Game::Id))
                    .col(integer(Game::OwnerId))
                    .col(string(Game::Title))
                    .col(string_null(Game::Publisher))
                    .col(integer_null(Game::ReleaseYear))
                    .col(integer(Game::MinPlayers))
                    .col(integer(Game::MaxPlayers))
                    .col(integer_null(Game::PlayTimeMinutes))
                    .col(integer_null(Game::MinAge))
                    .col(text_null(Game::Notes))
                    .col(string_null(Game::ImagePath))
                    .col(timestamp_with_time_zone(Game::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_owner_id")
                            .from(Game::Table, Game::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_owner_created")
                    .table(Game::Table)
                    .col(Game::OwnerId)
                    .col(Game::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    Id,
    OwnerId,
    Title,
    Publisher,
    ReleaseYear,
    MinPlayers,
    MaxPlayers,
    PlayTimeMinutes,
    MinAge,
    Notes,
    ImagePath,
    CreatedAt,
}
