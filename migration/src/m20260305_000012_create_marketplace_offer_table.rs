use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260301_000001_create_user_table::User, m20260301_000002_create_game_table::Game};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketplaceOffer::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketplaceOffer::Id))
                    .col(integer(MarketplaceOffer::GameId))
                    .col(integer(MarketplaceOffer::OwnerId))
                    .col(string(MarketplaceOffer::OfferType))
                    .col(big_integer_null(MarketplaceOffer::PriceCents))
                    .col(text(MarketplaceOffer::Description))
                    .col(boolean(MarketplaceOffer::Active).default(true))
                    .col(timestamp_with_time_zone(MarketplaceOffer::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_offer_game_id")
                            .from(MarketplaceOffer::Table, MarketplaceOffer::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_offer_owner_id")
                            .from(MarketplaceOffer::Table, MarketplaceOffer::OwnerId)
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
            .drop_table(Table::drop().table(MarketplaceOffer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MarketplaceOffer {
    Table,
    Id,
    GameId,
    OwnerId,
    OfferType,
    PriceCents,
    Description,
    Active,
    CreatedAt,
}
