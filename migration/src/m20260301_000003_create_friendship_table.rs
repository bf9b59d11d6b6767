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
                    .table(Friendship::Table)
                    .if_not_exists()
                    .col(pk_auto(Friendship::Id))
                    .col(integer(Friendship::RequesterId))
                    .col(integer(Friendship::AddresseeId))
                    .col(integer(Friendship::UserLow))
                    .col(integer(Friendship::UserHigh))
                    .col(string(Friendship::Status).default("pending"))
                    .col(timestamp_with_time_zone(Friendship::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_requester_id")
                            .from(Friendship::Table, Friendship::RequesterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_addressee_id")
                            .from(Friendship::Table, Friendship::AddresseeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_friendship_pair_unique")
                            .col(Friendship::UserLow)
                            .col(Friendship::UserHigh),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friendship::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Friendship {
    Table,
    Id,
    RequesterId,
    AddresseeId,
    UserLow,
    UserHigh,
    Status,
    CreatedAt,
}
