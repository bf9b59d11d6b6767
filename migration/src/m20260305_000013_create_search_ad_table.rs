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
                    .table(SearchAd::Table)
                    .if_not_exists()
                    .col(pk_auto(SearchAd::Id))
                    .col(integer(SearchAd::UserId))
                    .col(string(SearchAd::GameTitle))
                    .col(string(SearchAd::AdType))
                    .col(big_integer_null(SearchAd::MaxPriceCents))
                    .col(text(SearchAd::Description))
                    .col(boolean(SearchAd::Active).default(true))
                    .col(timestamp_with_time_zone(SearchAd::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_search_ad_user_id")
                            .from(SearchAd::Table, SearchAd::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchAd::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SearchAd {
    Table,
    Id,
    UserId,
    GameTitle,
    AdType,
    MaxPriceCents,
    Description,
    Active,
    CreatedAt,
}
