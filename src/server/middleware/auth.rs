//! Session re-validation and permission checks for protected endpoints.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{community::CommunityRepository, membership::MembershipRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{community::MemberRole, user::User},
};

/// A permission an endpoint requires from the caller.
///
/// Platform admins hold every permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Platform administrator.
    Admin,
    /// Member of the group with the given id, any role.
    CommunityMember(i32),
    /// Admin of the group with the given id.
    CommunityAdmin(i32),
}

/// Re-validates the session against the database on every protected call.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the logged-in user and checks every permission in order.
    ///
    /// # Arguments
    /// - `permissions` - Permissions that must all hold; empty means "logged in"
    ///
    /// # Returns
    /// - `Ok(User)` - The caller, freshly loaded from the database
    /// - `Err(AuthError::UserNotInSession)` - No user in the session (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session points to a deleted user (404)
    /// - `Err(AuthError::AccessDenied)` - A permission is missing (403)
    /// - `Err(AppError::NotFound)` - A referenced group does not exist
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            self.check(&user, *permission).await?;
        }

        Ok(user)
    }

    async fn check(&self, user: &User, permission: Permission) -> Result<(), AppError> {
        match permission {
            Permission::Admin => {
                if !user.admin {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        "User attempted an admin action without admin permissions".to_string(),
                    )
                    .into());
                }
            }
            Permission::CommunityMember(community_id) => {
                let role = self.community_role(user, community_id).await?;
                if !user.admin && role.is_none() {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!("User is not a member of group {}", community_id),
                    )
                    .into());
                }
            }
            Permission::CommunityAdmin(community_id) => {
                let role = self.community_role(user, community_id).await?;
                if !user.admin && role != Some(MemberRole::Admin) {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!("User is not an admin of group {}", community_id),
                    )
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Role of `user` in the group, after making sure the group exists.
    async fn community_role(
        &self,
        user: &User,
        community_id: i32,
    ) -> Result<Option<MemberRole>, AppError> {
        if CommunityRepository::new(self.db)
            .find_by_id(community_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Group not found".to_string()));
        }

        let membership = MembershipRepository::new(self.db)
            .find(community_id, user.id)
            .await?;

        Ok(membership.map(|m| m.role))
    }
}
