//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles user creation on login, profile updates, search and admin status management
//! with conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    model::user::{UpdateProfileParams, UpsertUserParam, User},
    util::db::contains_literal,
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the user on first login or refreshes an existing one.
    ///
    /// Users are matched by `provider_id`. An existing user keeps their username and display
    /// name (both are editable in the app); only the admin flag is updated, and only when
    /// `is_admin` is `Some`. A new user gets `param.username`, or the first free
    /// `{username}{n}` with n starting at 2 when the name is taken.
    ///
    /// # Arguments
    /// - `param` - Provider identity, preferred username and optional admin status
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(DbErr)` - Database error during lookup, insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::User::find()
            .filter(entity::user::Column::ProviderId.eq(&param.provider_id))
            .one(&txn)
            .await?;

        let entity = match existing {
            Some(user) => match param.is_admin {
                Some(admin) if admin != user.admin => {
                    let mut active: entity::user::ActiveModel = user.into();
                    active.admin = ActiveValue::Set(admin);
                    active.update(&txn).await?
                }
                _ => user,
            },
            None => {
                let username = Self::free_username(&txn, &param.username).await?;
                entity::user::ActiveModel {
                    provider_id: ActiveValue::Set(param.provider_id),
                    username: ActiveValue::Set(username),
                    display_name: ActiveValue::Set(param.display_name),
                    bio: ActiveValue::Set(None),
                    location: ActiveValue::Set(None),
                    avatar_path: ActiveValue::Set(None),
                    admin: ActiveValue::Set(param.is_admin.unwrap_or(false)),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        Ok(User::from_entity(entity))
    }

    /// Finds the first unused username starting from `base`.
    async fn free_username<C: ConnectionTrait>(db: &C, base: &str) -> Result<String, DbErr> {
        let taken: Vec<String> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Username)
            .filter(entity::user::Column::Username.starts_with(base))
            .into_tuple()
            .all(db)
            .await?;

        if !taken.iter().any(|name| name == base) {
            return Ok(base.to_string());
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Loads the users with the given ids, keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids(&self, user_ids: &[i32]) -> Result<HashMap<i32, User>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|e| (e.id, User::from_entity(e)))
            .collect())
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used at startup to decide whether a one-time admin login link is needed.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets all users with pagination, ordered by username.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users to return per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Username)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, total))
    }

    /// Grants or revokes admin privileges.
    ///
    /// # Returns
    /// - `Ok(())` - Update executed (no-op when the user does not exist)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_admin(&self, user_id: i32, admin: bool) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(
                entity::user::Column::Admin,
                sea_orm::sea_query::Expr::value(admin),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Replaces display name, bio and location.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User does not exist
    pub async fn update_profile(&self, params: UpdateProfileParams) -> Result<Option<User>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(params.user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        active.display_name = ActiveValue::Set(params.display_name);
        active.bio = ActiveValue::Set(params.bio);
        active.location = ActiveValue::Set(params.location);
        let updated = active.update(self.db).await?;

        Ok(Some(User::from_entity(updated)))
    }

    /// Stores a new avatar path and returns the one it replaced.
    pub async fn set_avatar_path(
        &self,
        user_id: i32,
        avatar_path: Option<String>,
    ) -> Result<Option<String>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!("user {}", user_id)));
        };

        let previous = user.avatar_path.clone();
        let mut active: entity::user::ActiveModel = user.into();
        active.avatar_path = ActiveValue::Set(avatar_path);
        active.update(self.db).await?;

        Ok(previous)
    }

    /// Finds users whose username or display name contains `query`, ordered by username.
    pub async fn search(&self, query: &str, limit: u64) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(contains_literal(entity::user::Column::Username, query))
                    .add(contains_literal(entity::user::Column::DisplayName, query)),
            )
            .order_by_asc(entity::user::Column::Username)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }
}
