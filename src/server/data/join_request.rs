//! Join request repository for moderated groups.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    error::{internal::InternalError, AppError},
    model::{
        community::{JoinRequest, JoinRequestEntry, JoinRequestStatus, MemberRole, Membership},
        user::User,
    },
};

pub struct JoinRequestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> JoinRequestRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending request.
    pub async fn create(
        &self,
        community_id: i32,
        user_id: i32,
        message: Option<String>,
    ) -> Result<JoinRequest, AppError> {
        let entity = entity::join_request::ActiveModel {
            community_id: ActiveValue::Set(community_id),
            user_id: ActiveValue::Set(user_id),
            message: ActiveValue::Set(message),
            status: ActiveValue::Set(JoinRequestStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            resolved_at: ActiveValue::Set(None),
            resolved_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(JoinRequest::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, request_id: i32) -> Result<Option<JoinRequest>, AppError> {
        let entity = entity::prelude::JoinRequest::find_by_id(request_id)
            .one(self.db)
            .await?;

        Ok(entity.map(JoinRequest::from_entity).transpose()?)
    }

    /// Finds the pending request of `user_id` for `community_id`.
    pub async fn find_pending(
        &self,
        community_id: i32,
        user_id: i32,
    ) -> Result<Option<JoinRequest>, AppError> {
        let entity = entity::prelude::JoinRequest::find()
            .filter(entity::join_request::Column::CommunityId.eq(community_id))
            .filter(entity::join_request::Column::UserId.eq(user_id))
            .filter(entity::join_request::Column::Status.eq(JoinRequestStatus::Pending.as_str()))
            .one(self.db)
            .await?;

        Ok(entity.map(JoinRequest::from_entity).transpose()?)
    }

    /// Pending requests of a group with the requesting users, oldest first.
    pub async fn get_pending_for_community(
        &self,
        community_id: i32,
    ) -> Result<Vec<JoinRequestEntry>, AppError> {
        let Some(community) = entity::prelude::Community::find_by_id(community_id)
            .one(self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        let rows = entity::prelude::JoinRequest::find()
            .filter(entity::join_request::Column::CommunityId.eq(community_id))
            .filter(entity::join_request::Column::Status.eq(JoinRequestStatus::Pending.as_str()))
            .order_by_asc(entity::join_request::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(request, user)| -> Result<JoinRequestEntry, AppError> {
                let user = user.ok_or(InternalError::MissingRelation {
                    table: "user",
                    id: request.user_id,
                })?;
                Ok(JoinRequestEntry {
                    request: JoinRequest::from_entity(request)?,
                    user: User::from_entity(user),
                    community_name: community.name.clone(),
                })
            })
            .collect()
    }

    /// All requests made by `user_id`, newest first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<JoinRequestEntry>, AppError> {
        let Some(user) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(Vec::new());
        };
        let user = User::from_entity(user);

        let requests = entity::prelude::JoinRequest::find()
            .filter(entity::join_request::Column::UserId.eq(user_id))
            .order_by_desc(entity::join_request::Column::CreatedAt)
            .all(self.db)
            .await?;

        let community_ids: Vec<i32> = requests.iter().map(|r| r.community_id).collect();
        let names: HashMap<i32, String> = entity::prelude::Community::find()
            .filter(entity::community::Column::Id.is_in(community_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        requests
            .into_iter()
            .map(|request| -> Result<JoinRequestEntry, AppError> {
                let community_name = names.get(&request.community_id).cloned().ok_or(
                    InternalError::MissingRelation {
                        table: "community",
                        id: request.community_id,
                    },
                )?;
                Ok(JoinRequestEntry {
                    request: JoinRequest::from_entity(request)?,
                    user: user.clone(),
                    community_name,
                })
            })
            .collect()
    }

    /// Approves a request and adds the user as a member in one transaction.
    ///
    /// # Returns
    /// - `Ok(Some(Membership))` - The membership created for the requester
    /// - `Ok(None)` - The request was no longer pending; nothing was written
    /// - `Err(AppError::DbErr)` - Update or insert failed
    pub async fn approve(
        &self,
        request: &JoinRequest,
        resolved_by: i32,
    ) -> Result<Option<Membership>, AppError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let updated = entity::prelude::JoinRequest::update_many()
            .filter(entity::join_request::Column::Id.eq(request.id))
            .filter(entity::join_request::Column::Status.eq(JoinRequestStatus::Pending.as_str()))
            .col_expr(
                entity::join_request::Column::Status,
                sea_orm::sea_query::Expr::value(JoinRequestStatus::Approved.as_str()),
            )
            .col_expr(
                entity::join_request::Column::ResolvedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .col_expr(
                entity::join_request::Column::ResolvedBy,
                sea_orm::sea_query::Expr::value(resolved_by),
            )
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let membership = entity::community_member::ActiveModel {
            community_id: ActiveValue::Set(request.community_id),
            user_id: ActiveValue::Set(request.user_id),
            role: ActiveValue::Set(MemberRole::Member.as_str().to_string()),
            joined_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Some(Membership::from_entity(membership)?))
    }

    /// Marks a pending request as rejected. Returns `false` if it was no longer pending.
    pub async fn reject(&self, request_id: i32, resolved_by: i32) -> Result<bool, DbErr> {
        let updated = entity::prelude::JoinRequest::update_many()
            .filter(entity::join_request::Column::Id.eq(request_id))
            .filter(entity::join_request::Column::Status.eq(JoinRequestStatus::Pending.as_str()))
            .col_expr(
                entity::join_request::Column::Status,
                sea_orm::sea_query::Expr::value(JoinRequestStatus::Rejected.as_str()),
            )
            .col_expr(
                entity::join_request::Column::ResolvedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .col_expr(
                entity::join_request::Column::ResolvedBy,
                sea_orm::sea_query::Expr::value(resolved_by),
            )
            .exec(self.db)
            .await?;
        Ok(updated.rows_affected > 0)
    }

    pub async fn delete(&self, request_id: i32) -> Result<(), DbErr> {
        entity::prelude::JoinRequest::delete_by_id(request_id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
