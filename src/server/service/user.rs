//! User service for profiles, user search and admin management.
//!
//! This module provides the `UserService` for user-related business logic. It validates
//! profile edits, resolves public profiles with their library size, handles avatar uploads
//! and the platform admin list, working with domain models rather than DTOs.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{game::GameRepository, user::UserRepository},
    error::AppError,
    model::{
        storage::Bucket,
        user::{PaginatedUsers, Profile, UpdateProfileParams, User},
    },
    service::storage::StorageService,
    util::text::normalize_optional,
};

const DISPLAY_NAME_MAX_CHARS: usize = 50;
const BIO_MAX_CHARS: usize = 500;
const SEARCH_MIN_CHARS: usize = 2;
const SEARCH_MAX_RESULTS: u64 = 20;

/// Service providing business logic for users.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a user's profile with the number of games in their library.
    ///
    /// # Returns
    /// - `Ok(Profile)` - User and game count
    /// - `Err(AppError::NotFound)` - No user with that id
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_profile(&self, user_id: i32) -> Result<Profile, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };
        let game_count = GameRepository::new(self.db).count_by_owner(user_id).await?;

        Ok(Profile { user, game_count })
    }

    /// Validates and stores display name, bio and location.
    ///
    /// Text is trimmed; an empty bio or location is stored as `NULL`.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Display name empty or longer than 50 characters, or
    ///   bio longer than 500 characters
    /// - `Err(AppError::NotFound)` - User no longer exists
    pub async fn update_profile(&self, params: UpdateProfileParams) -> Result<User, AppError> {
        let display_name = params.display_name.trim().to_string();
        if display_name.is_empty() || display_name.chars().count() > DISPLAY_NAME_MAX_CHARS {
            return Err(AppError::BadRequest(format!(
                "Display name must be between 1 and {} characters",
                DISPLAY_NAME_MAX_CHARS
            )));
        }
        let bio = normalize_optional(params.bio);
        if bio
            .as_ref()
            .is_some_and(|b| b.chars().count() > BIO_MAX_CHARS)
        {
            return Err(AppError::BadRequest(format!(
                "Bio must be at most {} characters",
                BIO_MAX_CHARS
            )));
        }

        let updated = UserRepository::new(self.db)
            .update_profile(UpdateProfileParams {
                user_id: params.user_id,
                display_name,
                bio,
                location: normalize_optional(params.location),
            })
            .await?;

        updated.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Searches users by username or display name.
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - Up to 20 users ordered by username
    /// - `Err(AppError::BadRequest)` - Query shorter than 2 characters after trimming
    pub async fn search(&self, query: &str) -> Result<Vec<User>, AppError> {
        let query = query.trim();
        if query.chars().count() < SEARCH_MIN_CHARS {
            return Err(AppError::BadRequest(format!(
                "Search query must be at least {} characters",
                SEARCH_MIN_CHARS
            )));
        }

        Ok(UserRepository::new(self.db)
            .search(query, SEARCH_MAX_RESULTS)
            .await?)
    }

    /// Stores a new avatar and deletes the file it replaces.
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new avatar path
    /// - `Err(AppError::BadRequest)` - Upload rejected by storage validation
    pub async fn upload_avatar(
        &self,
        storage: &StorageService<'_>,
        user_id: i32,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let path = storage
            .save(Bucket::Avatars, user_id, content_type, bytes)
            .await?;
        let previous = match user_repo.set_avatar_path(user_id, Some(path.clone())).await {
            Ok(previous) => previous,
            Err(e) => {
                storage.remove(&path).await;
                return Err(e.into());
            }
        };
        if let Some(previous) = previous {
            storage.remove(&previous).await;
        }

        user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Retrieves all users with pagination.
    ///
    /// Returns a paginated collection of users ordered by username and calculates the
    /// total number of pages from the item count.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Users per page, at least 1
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the requested page with pagination metadata
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let per_page = per_page.max(1);
        let (users, total_items) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        let total_pages = total_items.div_ceil(per_page);

        Ok(PaginatedUsers {
            users,
            total: total_items,
            page,
            per_page,
            total_pages,
        })
    }

    /// Grants or revokes platform admin privileges.
    ///
    /// An admin cannot revoke their own privileges.
    ///
    /// # Arguments
    /// - `actor_id` - Admin performing the change
    /// - `user_id` - Target user
    /// - `admin` - New admin status
    ///
    /// # Returns
    /// - `Ok(User)` - Target user after the change
    /// - `Err(AppError::BadRequest)` - Actor tried to revoke their own admin status
    /// - `Err(AppError::NotFound)` - Target user does not exist
    pub async fn set_admin(&self, actor_id: i32, user_id: i32, admin: bool) -> Result<User, AppError> {
        if actor_id == user_id && !admin {
            return Err(AppError::BadRequest(
                "You cannot revoke your own admin privileges".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        user_repo.set_admin(user_id, admin).await?;

        user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
