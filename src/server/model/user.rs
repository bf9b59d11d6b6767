//! User domain models and parameters.
//!
//! Users are created on first OAuth login. The provider subject is kept as `provider_id`;
//! `username` is derived from the provider profile and made unique on insert.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{PaginatedUsersDto, ProfileDto, UserDto, UserSummaryDto},
    server::model::storage::storage_url,
};

/// Application user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Storage path of the avatar (`avatars/{name}`), if one was uploaded.
    pub avatar_path: Option<String>,
    /// Whether the user has platform admin privileges.
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            display_name: entity.display_name,
            bio: entity.bio,
            location: entity.location,
            avatar_path: entity.avatar_path,
            admin: entity.admin,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            avatar_url: storage_url(self.avatar_path.as_deref()),
            id: self.id,
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            location: self.location,
            admin: self.admin,
            created_at: self.created_at,
        }
    }

    /// Short reference used wherever another user is shown inside a larger object.
    pub fn to_summary_dto(&self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: storage_url(self.avatar_path.as_deref()),
        }
    }
}

/// Public view of a user together with the size of their library.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    pub game_count: u64,
}

impl Profile {
    pub fn into_dto(self) -> ProfileDto {
        ProfileDto {
            avatar_url: storage_url(self.user.avatar_path.as_deref()),
            id: self.user.id,
            username: self.user.username,
            display_name: self.user.display_name,
            bio: self.user.bio,
            location: self.user.location,
            game_count: self.game_count,
            created_at: self.user.created_at,
        }
    }
}

/// Parameters for creating or refreshing a user after OAuth login.
///
/// The optional `is_admin` field preserves existing admin status when None.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Subject identifier from the OAuth provider.
    pub provider_id: String,
    /// Preferred username; a numeric suffix is appended when it is taken.
    pub username: String,
    /// Display name used only when the user is created.
    pub display_name: String,
    /// Optional admin status (None preserves existing admin status, Some updates it).
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileParams {
    pub user_id: i32,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
