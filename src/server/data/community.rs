//! Community (group) repository.
//!
//! Provides `CommunityRepository` for creating, listing, updating and deleting groups.
//! Member counts are computed with a grouped count over `community_member` and attached
//! to every returned `Community`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    error::AppError,
    model::community::{Community, MemberRole, SaveCommunityParams},
    util::db::contains_literal,
};

pub struct CommunityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityRepository<'a> {
    /// Creates a new CommunityRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group and inserts its creator as the first admin member.
    ///
    /// Both rows are written in one transaction, so a failed membership insert leaves no
    /// orphaned group behind.
    ///
    /// # Arguments
    /// - `creator_id` - User creating the group
    /// - `params` - Validated group fields
    ///
    /// # Returns
    /// - `Ok(Community)` - Created group with a member count of 1
    /// - `Err(AppError::DbErr)` - Insert failed, including unique name violations
    pub async fn create(
        &self,
        creator_id: i32,
        params: SaveCommunityParams,
    ) -> Result<Community, AppError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let community = entity::community::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            approval_mode: ActiveValue::Set(params.approval_mode.as_str().to_string()),
            max_members: ActiveValue::Set(params.max_members),
            creator_id: ActiveValue::Set(creator_id),
            image_path: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        entity::community_member::ActiveModel {
            community_id: ActiveValue::Set(community.id),
            user_id: ActiveValue::Set(creator_id),
            role: ActiveValue::Set(MemberRole::Admin.as_str().to_string()),
            joined_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Community::from_entity(community, 1)?)
    }

    /// Finds a group by id with its member count.
    pub async fn find_by_id(&self, community_id: i32) -> Result<Option<Community>, AppError> {
        let Some(entity) = entity::prelude::Community::find_by_id(community_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let counts = Self::member_counts(self.db, vec![entity.id]).await?;
        let count = counts.get(&entity.id).copied().unwrap_or(0);

        Ok(Some(Community::from_entity(entity, count)?))
    }

    /// Checks whether another group already uses `name`.
    ///
    /// # Arguments
    /// - `name` - Name to look up
    /// - `excluding` - Group to ignore, used when renaming a group
    pub async fn name_taken(&self, name: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Community::find().filter(entity::community::Column::Name.eq(name));
        if let Some(id) = excluding {
            query = query.filter(entity::community::Column::Id.ne(id));
        }

        Ok(query.one(self.db).await?.is_some())
    }

    /// Lists groups newest first, optionally filtered by a substring of the name,
    /// description or location.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Community>, AppError> {
        let mut query = entity::prelude::Community::find();
        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(contains_literal(entity::community::Column::Name, search))
                    .add(contains_literal(entity::community::Column::Description, search))
                    .add(contains_literal(entity::community::Column::Location, search)),
            );
        }

        let entities = query
            .order_by_desc(entity::community::Column::CreatedAt)
            .order_by_desc(entity::community::Column::Id)
            .all(self.db)
            .await?;

        self.with_counts(entities).await
    }

    /// Lists the groups `user_id` is a member of, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Community>, AppError> {
        let community_ids: Vec<i32> = entity::prelude::CommunityMember::find()
            .select_only()
            .column(entity::community_member::Column::CommunityId)
            .filter(entity::community_member::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if community_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Community::find()
            .filter(entity::community::Column::Id.is_in(community_ids))
            .order_by_desc(entity::community::Column::CreatedAt)
            .order_by_desc(entity::community::Column::Id)
            .all(self.db)
            .await?;

        self.with_counts(entities).await
    }

    /// Replaces the editable fields of a group.
    ///
    /// # Returns
    /// - `Ok(Some(Community))` - Updated group
    /// - `Ok(None)` - Group does not exist
    pub async fn update(
        &self,
        community_id: i32,
        params: SaveCommunityParams,
    ) -> Result<Option<Community>, AppError> {
        let Some(community) = entity::prelude::Community::find_by_id(community_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::community::ActiveModel = community.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.approval_mode = ActiveValue::Set(params.approval_mode.as_str().to_string());
        active.max_members = ActiveValue::Set(params.max_members);
        active.update(self.db).await?;

        self.find_by_id(community_id).await
    }

    /// Stores a new image path and returns the one it replaced.
    pub async fn set_image_path(
        &self,
        community_id: i32,
        image_path: Option<String>,
    ) -> Result<Option<String>, DbErr> {
        let Some(community) = entity::prelude::Community::find_by_id(community_id)
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!("community {}", community_id)));
        };

        let previous = community.image_path.clone();
        let mut active: entity::community::ActiveModel = community.into();
        active.image_path = ActiveValue::Set(image_path);
        active.update(self.db).await?;

        Ok(previous)
    }

    /// Deletes a group with its memberships, join requests, polls and events.
    ///
    /// # Returns
    /// - `Ok(true)` - Group deleted
    /// - `Ok(false)` - Group did not exist
    pub async fn delete(&self, community_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let poll_ids: Vec<i32> = entity::prelude::Poll::find()
            .select_only()
            .column(entity::poll::Column::Id)
            .filter(entity::poll::Column::CommunityId.eq(community_id))
            .into_tuple()
            .all(&txn)
            .await?;
        if !poll_ids.is_empty() {
            entity::prelude::PollVote::delete_many()
                .filter(entity::poll_vote::Column::PollId.is_in(poll_ids.clone()))
                .exec(&txn)
                .await?;
            entity::prelude::PollOption::delete_many()
                .filter(entity::poll_option::Column::PollId.is_in(poll_ids))
                .exec(&txn)
                .await?;
        }
        entity::prelude::Poll::delete_many()
            .filter(entity::poll::Column::CommunityId.eq(community_id))
            .exec(&txn)
            .await?;

        let event_ids: Vec<i32> = entity::prelude::Event::find()
            .select_only()
            .column(entity::event::Column::Id)
            .filter(entity::event::Column::CommunityId.eq(community_id))
            .into_tuple()
            .all(&txn)
            .await?;
        if !event_ids.is_empty() {
            entity::prelude::EventParticipant::delete_many()
                .filter(entity::event_participant::Column::EventId.is_in(event_ids))
                .exec(&txn)
                .await?;
        }
        entity::prelude::Event::delete_many()
            .filter(entity::event::Column::CommunityId.eq(community_id))
            .exec(&txn)
            .await?;

        entity::prelude::JoinRequest::delete_many()
            .filter(entity::join_request::Column::CommunityId.eq(community_id))
            .exec(&txn)
            .await?;
        entity::prelude::CommunityMember::delete_many()
            .filter(entity::community_member::Column::CommunityId.eq(community_id))
            .exec(&txn)
            .await?;

        let result = entity::prelude::Community::delete_by_id(community_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn with_counts(
        &self,
        entities: Vec<entity::community::Model>,
    ) -> Result<Vec<Community>, AppError> {
        let ids = entities.iter().map(|e| e.id).collect();
        let counts = Self::member_counts(self.db, ids).await?;

        entities
            .into_iter()
            .map(|e| {
                let count = counts.get(&e.id).copied().unwrap_or(0);
                Community::from_entity(e, count).map_err(AppError::from)
            })
            .collect()
    }

    /// Counts members per group for the given group ids.
    pub async fn member_counts<C: ConnectionTrait>(
        db: &C,
        community_ids: Vec<i32>,
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if community_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::CommunityMember::find()
            .select_only()
            .column(entity::community_member::Column::CommunityId)
            .column_as(entity::community_member::Column::Id.count(), "member_count")
            .filter(entity::community_member::Column::CommunityId.is_in(community_ids))
            .group_by(entity::community_member::Column::CommunityId)
            .into_tuple()
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, count.max(0) as u64))
            .collect())
    }
}
