//! Friendship repository.
//!
//! A friendship row links a requester and an addressee. Pending rows are friend requests;
//! accepting flips the status, declining or unfriending deletes the row. The ordered pair
//! `(user_low, user_high)` is unique, so two users share at most one row in either direction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::friend::{Friendship, FriendshipStatus},
};

pub struct FriendshipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendshipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending request from `requester_id` to `addressee_id`.
    ///
    /// Fails with a unique constraint violation when the two users already share a row.
    pub async fn create(&self, requester_id: i32, addressee_id: i32) -> Result<Friendship, AppError> {
        let entity = entity::friendship::ActiveModel {
            requester_id: ActiveValue::Set(requester_id),
            addressee_id: ActiveValue::Set(addressee_id),
            user_low: ActiveValue::Set(requester_id.min(addressee_id)),
            user_high: ActiveValue::Set(requester_id.max(addressee_id)),
            status: ActiveValue::Set(FriendshipStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Friendship::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, friendship_id: i32) -> Result<Option<Friendship>, AppError> {
        let entity = entity::prelude::Friendship::find_by_id(friendship_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Friendship::from_entity).transpose()?)
    }

    /// Finds the relation between two users in either direction.
    pub async fn find_between(&self, a: i32, b: i32) -> Result<Option<Friendship>, AppError> {
        let entity = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::UserLow.eq(a.min(b)))
            .filter(entity::friendship::Column::UserHigh.eq(a.max(b)))
            .one(self.db)
            .await?;

        Ok(entity.map(Friendship::from_entity).transpose()?)
    }

    /// Marks a request as accepted.
    pub async fn accept(&self, friendship_id: i32) -> Result<(), DbErr> {
        entity::prelude::Friendship::update_many()
            .filter(entity::friendship::Column::Id.eq(friendship_id))
            .col_expr(
                entity::friendship::Column::Status,
                sea_orm::sea_query::Expr::value(FriendshipStatus::Accepted.as_str()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, friendship_id: i32) -> Result<(), DbErr> {
        entity::prelude::Friendship::delete_by_id(friendship_id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Accepted friendships of `user_id` in either direction, newest first.
    pub async fn get_accepted(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .filter(
                Condition::any()
                    .add(entity::friendship::Column::RequesterId.eq(user_id))
                    .add(entity::friendship::Column::AddresseeId.eq(user_id)),
            )
            .order_by_desc(entity::friendship::Column::CreatedAt)
            .all(self.db)
            .await?;

        Self::convert(entities)
    }

    /// Pending requests addressed to `user_id`, newest first.
    pub async fn get_incoming(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .filter(entity::friendship::Column::AddresseeId.eq(user_id))
            .order_by_desc(entity::friendship::Column::CreatedAt)
            .all(self.db)
            .await?;

        Self::convert(entities)
    }

    /// Pending requests sent by `user_id`, newest first.
    pub async fn get_outgoing(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .filter(entity::friendship::Column::RequesterId.eq(user_id))
            .order_by_desc(entity::friendship::Column::CreatedAt)
            .all(self.db)
            .await?;

        Self::convert(entities)
    }

    fn convert(entities: Vec<entity::friendship::Model>) -> Result<Vec<Friendship>, AppError> {
        entities
            .into_iter()
            .map(|e| Friendship::from_entity(e).map_err(AppError::from))
            .collect()
    }
}
