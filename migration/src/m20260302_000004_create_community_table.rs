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
                    .table(Community::Table)
                    .if_not_exists()
                    .col(pk_auto(Community::Id))
                    .col(string_uniq(Community::Name))
                    .col(text(Community::Description))
                    .col(string_null(Community::Location))
                    .col(string(Community::ApprovalMode).default("open"))
                    .col(integer_null(Community::MaxMembers))
                    .col(integer(Community::CreatorId))
                    .col(string_null(Community::ImagePath))
                    .col(timestamp_with_time_zone(Community::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_creator_id")
                            .from(Community::Table, Community::CreatorId)
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
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Community {
    Table,
    Id,
    Name,
    Description,
    Location,
    ApprovalMode,
    MaxMembers,
    CreatorId,
    ImagePath,
    CreatedAt,
}
