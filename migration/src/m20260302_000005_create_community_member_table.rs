use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260302_000004_create_community_table::Community,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityMember::Table)
                    .if_not_exists()
                    .col(pk_auto(CommunityMember::Id))
                    .col(integer(CommunityMember::CommunityId))
                    .col(integer(CommunityMember::UserId))
                    .col(string(CommunityMember::Role).default("member"))
                    .col(timestamp_with_time_zone(CommunityMember::JoinedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_community_id")
                            .from(CommunityMember::Table, CommunityMember::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_member_user_id")
                            .from(CommunityMember::Table, CommunityMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_community_member_unique")
                            .col(CommunityMember::CommunityId)
                            .col(CommunityMember::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommunityMember {
    Table,
    Id,
    CommunityId,
    UserId,
    Role,
    JoinedAt,
}
