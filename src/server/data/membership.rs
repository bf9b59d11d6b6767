//! Group membership repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::{
        community::{Member, MemberRole, Membership},
        user::User,
    },
};

pub struct MembershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a membership row.
    ///
    /// # Returns
    /// - `Ok(Membership)` - Created membership
    /// - `Err(AppError::DbErr)` - Insert failed; a unique violation means the user is
    ///   already a member
    pub async fn add(
        &self,
        community_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<Membership, AppError> {
        let entity = entity::community_member::ActiveModel {
            community_id: ActiveValue::Set(community_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Membership::from_entity(entity)?)
    }

    /// Finds the membership of `user_id` in `community_id`.
    pub async fn find(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> Result<Option<Membership>, AppError> {
        let entity = entity::prelude::CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Membership::from_entity).transpose()?)
    }

    /// Members with their user rows, admins first and then by join date.
    pub async fn get_members(&self, community_id: i32) -> Result<Vec<Member>, AppError> {
        let rows = entity::prelude::CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .order_by_asc(entity::community_member::Column::JoinedAt)
            .order_by_asc(entity::community_member::Column::Id)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        let mut members = Vec::with_capacity(rows.len());
        for (membership, user) in rows {
            let Some(user) = user else {
                return Err(InternalError::MissingRelation {
                    table: "user",
                    id: membership.user_id,
                }
                .into());
            };
            members.push(Member {
                membership: Membership::from_entity(membership)?,
                user: User::from_entity(user),
            });
        }

        // Stable sort keeps join order within each role
        members.sort_by_key(|m| match m.membership.role {
            MemberRole::Admin => 0,
            MemberRole::Member => 1,
        });

        Ok(members)
    }

    pub async fn count(&self, community_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .count(self.db)
            .await
    }

    pub async fn count_admins(&self, community_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::Role.eq(MemberRole::Admin.as_str()))
            .count(self.db)
            .await
    }

    pub async fn set_role(
        &self,
        community_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<(), DbErr> {
        entity::prelude::CommunityMember::update_many()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .col_expr(
                entity::community_member::Column::Role,
                sea_orm::sea_query::Expr::value(role.as_str()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Removes a membership.
    ///
    /// # Returns
    /// - `Ok(true)` - Membership removed
    /// - `Ok(false)` - User was not a member
    pub async fn remove(&self, community_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CommunityMember::delete_many()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
