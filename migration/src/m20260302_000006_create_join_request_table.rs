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
                    .table(JoinRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(JoinRequest::Id))
                    .col(integer(JoinRequest::CommunityId))
                    .col(integer(JoinRequest::UserId))
                    .col(text_null(JoinRequest::Message))
                    .col(string(JoinRequest::Status).default("pending"))
                    .col(timestamp_with_time_zone(JoinRequest::CreatedAt))
                    .col(timestamp_with_time_zone_null(JoinRequest::ResolvedAt))
                    .col(integer_null(JoinRequest::ResolvedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_join_request_community_id")
                            .from(JoinRequest::Table, JoinRequest::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_join_request_user_id")
                            .from(JoinRequest::Table, JoinRequest::UserId)
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
                    .name("idx_join_request_community_status")
                    .table(JoinRequest::Table)
                    .col(JoinRequest::CommunityId)
                    .col(JoinRequest::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JoinRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum JoinRequest {
    Table,
    Id,
    CommunityId,
    UserId,
    Message,
    Status,
    CreatedAt,
    ResolvedAt,
    ResolvedBy,
}
