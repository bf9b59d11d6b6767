//! Groups, memberships and join requests.
//!
//! `CommunityService` enforces the membership rules that the guard cannot express on its
//! own: capacity limits, the approval mode of a group, the last-admin rule, and the
//! lifecycle of join requests. Permission checks (member, group admin) happen in the
//! controllers through `AuthGuard` before these methods are called.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        community::CommunityRepository, join_request::JoinRequestRepository,
        membership::MembershipRepository,
    },
    error::AppError,
    model::{
        community::{
            ApprovalMode, Community, CommunityDetail, JoinOutcome, JoinRequest, JoinRequestEntry,
            JoinRequestStatus, MemberRole, Membership, SaveCommunityParams,
        },
        storage::Bucket,
        user::User,
    },
    service::storage::StorageService,
    util::db::map_app_unique_violation,
};

const NAME_TAKEN: &str = "A group with this name already exists";
const ALREADY_MEMBER: &str = "You are already a member of this group";
const REQUEST_PENDING: &str = "A join request for this group is already pending";

pub struct CommunityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group and makes its creator the first admin.
    ///
    /// # Returns
    /// - `Ok(Community)` - Created group with a member count of 1
    /// - `Err(AppError::BadRequest)` - Validation failed
    /// - `Err(AppError::Conflict)` - Name already in use
    pub async fn create(
        &self,
        creator_id: i32,
        params: SaveCommunityParams,
    ) -> Result<Community, AppError> {
        params.validate()?;

        let repo = CommunityRepository::new(self.db);
        if repo.name_taken(&params.name, None).await? {
            return Err(AppError::Conflict(NAME_TAKEN.to_string()));
        }

        let community = repo
            .create(creator_id, params)
            .await
            .map_err(|e| map_app_unique_violation(e, NAME_TAKEN))?;
        tracing::info!("User {} created group {}", creator_id, community.id);

        Ok(community)
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Community>, AppError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        CommunityRepository::new(self.db).list(search).await
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Community>, AppError> {
        CommunityRepository::new(self.db).list_for_user(user_id).await
    }

    pub async fn get(&self, community_id: i32) -> Result<Community, AppError> {
        CommunityRepository::new(self.db)
            .find_by_id(community_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))
    }

    /// Group with its members and the viewer's own standing.
    pub async fn get_detail(
        &self,
        community_id: i32,
        viewer_id: i32,
    ) -> Result<CommunityDetail, AppError> {
        let community = self.get(community_id).await?;
        let members = MembershipRepository::new(self.db)
            .get_members(community_id)
            .await?;
        let my_role = members
            .iter()
            .find(|m| m.user.id == viewer_id)
            .map(|m| m.membership.role);
        let has_pending_request = JoinRequestRepository::new(self.db)
            .find_pending(community_id, viewer_id)
            .await?
            .is_some();

        Ok(CommunityDetail {
            community,
            members,
            my_role,
            has_pending_request,
        })
    }

    /// Replaces a group's settings.
    ///
    /// # Returns
    /// - `Ok(Community)` - Updated group
    /// - `Err(AppError::BadRequest)` - Validation failed or the new member limit is below
    ///   the current member count
    /// - `Err(AppError::Conflict)` - Name already used by another group
    pub async fn update(
        &self,
        community_id: i32,
        params: SaveCommunityParams,
    ) -> Result<Community, AppError> {
        params.validate()?;

        let repo = CommunityRepository::new(self.db);
        let current = self.get(community_id).await?;
        if params
            .max_members
            .is_some_and(|max| (max as u64) < current.member_count)
        {
            return Err(AppError::BadRequest(
                "The member limit cannot be lower than the current member count".to_string(),
            ));
        }
        if repo.name_taken(&params.name, Some(community_id)).await? {
            return Err(AppError::Conflict(NAME_TAKEN.to_string()));
        }

        repo.update(community_id, params)
            .await
            .map_err(|e| map_app_unique_violation(e, NAME_TAKEN))?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))
    }

    /// Deletes a group with all its content, then its image file.
    pub async fn delete(
        &self,
        storage: &StorageService<'_>,
        community_id: i32,
    ) -> Result<Community, AppError> {
        let community = self.get(community_id).await?;

        if !CommunityRepository::new(self.db)
            .delete(community_id)
            .await?
        {
            return Err(AppError::NotFound("Group not found".to_string()));
        }
        if let Some(path) = &community.image_path {
            storage.remove(path).await;
        }
        tracing::info!("Group {} deleted", community_id);

        Ok(community)
    }

    pub async fn upload_image(
        &self,
        storage: &StorageService<'_>,
        community_id: i32,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Community, AppError> {
        self.get(community_id).await?;

        let path = storage
            .save(Bucket::Communities, community_id, content_type, bytes)
            .await?;
        let previous = match CommunityRepository::new(self.db)
            .set_image_path(community_id, Some(path.clone()))
            .await
        {
            Ok(previous) => previous,
            Err(e) => {
                storage.remove(&path).await;
                return Err(e.into());
            }
        };
        if let Some(previous) = previous {
            storage.remove(&previous).await;
        }

        self.get(community_id).await
    }

    /// Joins a group directly or files a join request, depending on its approval mode.
    ///
    /// # Returns
    /// - `Ok(JoinOutcome::Joined)` - Open group, membership created
    /// - `Ok(JoinOutcome::Requested)` - Moderated group, pending request created
    /// - `Err(AppError::Conflict)` - Already a member, or a request is already pending
    /// - `Err(AppError::BadRequest)` - Group is full
    pub async fn join(
        &self,
        community_id: i32,
        user_id: i32,
        message: Option<String>,
    ) -> Result<JoinOutcome, AppError> {
        let community = self.get(community_id).await?;
        let membership_repo = MembershipRepository::new(self.db);

        if membership_repo.find(community_id, user_id).await?.is_some() {
            return Err(AppError::Conflict(ALREADY_MEMBER.to_string()));
        }
        if community.is_full() {
            return Err(AppError::BadRequest("This group is full".to_string()));
        }

        match community.approval_mode {
            ApprovalMode::Open => {
                let membership = membership_repo
                    .add(community_id, user_id, MemberRole::Member)
                    .await
                    .map_err(|e| map_app_unique_violation(e, ALREADY_MEMBER))?;
                Ok(JoinOutcome::Joined(membership))
            }
            ApprovalMode::Moderated => {
                let request_repo = JoinRequestRepository::new(self.db);
                if request_repo.find_pending(community_id, user_id).await?.is_some() {
                    return Err(AppError::Conflict(REQUEST_PENDING.to_string()));
                }
                let request = request_repo
                    .create(community_id, user_id, message)
                    .await
                    .map_err(|e| map_app_unique_violation(e, REQUEST_PENDING))?;
                Ok(JoinOutcome::Requested(request))
            }
        }
    }

    /// Leaves a group. The last remaining admin cannot leave.
    pub async fn leave(&self, community_id: i32, user_id: i32) -> Result<Membership, AppError> {
        let repo = MembershipRepository::new(self.db);
        let membership = self.membership(community_id, user_id).await?;

        if membership.role == MemberRole::Admin && repo.count_admins(community_id).await? <= 1 {
            return Err(AppError::BadRequest(
                "The last admin cannot leave the group; promote another member first".to_string(),
            ));
        }

        repo.remove(community_id, user_id).await?;

        Ok(membership)
    }

    /// Whether `user` may moderate content of the group: group admins and platform admins.
    pub async fn is_moderator(&self, community_id: i32, user: &User) -> Result<bool, AppError> {
        if user.admin {
            return Ok(true);
        }
        let membership = MembershipRepository::new(self.db)
            .find(community_id, user.id)
            .await?;
        Ok(membership.is_some_and(|m| m.role == MemberRole::Admin))
    }

    pub async fn list_pending_requests(
        &self,
        community_id: i32,
    ) -> Result<Vec<JoinRequestEntry>, AppError> {
        JoinRequestRepository::new(self.db)
            .get_pending_for_community(community_id)
            .await
    }

    pub async fn list_my_requests(&self, user_id: i32) -> Result<Vec<JoinRequestEntry>, AppError> {
        JoinRequestRepository::new(self.db).get_for_user(user_id).await
    }

    pub async fn get_request(&self, request_id: i32) -> Result<JoinRequest, AppError> {
        JoinRequestRepository::new(self.db)
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Join request not found".to_string()))
    }

    /// Approves a pending request and adds the requester as a member, re-checking capacity.
    pub async fn approve_request(
        &self,
        request: &JoinRequest,
        resolved_by: i32,
    ) -> Result<Membership, AppError> {
        Self::ensure_pending(request)?;

        let community = self.get(request.community_id).await?;
        if community.is_full() {
            return Err(AppError::BadRequest("This group is full".to_string()));
        }

        let membership = JoinRequestRepository::new(self.db)
            .approve(request, resolved_by)
            .await
            .map_err(|e| map_app_unique_violation(e, "The user is already a member"))?
            .ok_or_else(already_resolved)?;
        tracing::debug!(
            "Join request {} approved by user {}",
            request.id,
            resolved_by
        );

        Ok(membership)
    }

    pub async fn reject_request(
        &self,
        request: &JoinRequest,
        resolved_by: i32,
    ) -> Result<(), AppError> {
        Self::ensure_pending(request)?;

        if !JoinRequestRepository::new(self.db)
            .reject(request.id, resolved_by)
            .await?
        {
            return Err(already_resolved());
        }

        Ok(())
    }

    /// Withdraws the caller's own pending request.
    pub async fn cancel_request(&self, user_id: i32, request_id: i32) -> Result<JoinRequest, AppError> {
        let request = self.get_request(request_id).await?;
        if request.user_id != user_id {
            return Err(AppError::NotFound("Join request not found".to_string()));
        }
        Self::ensure_pending(&request)?;

        JoinRequestRepository::new(self.db)
            .delete(request_id)
            .await?;

        Ok(request)
    }

    pub async fn promote(&self, community_id: i32, user_id: i32) -> Result<Membership, AppError> {
        let membership = self.membership(community_id, user_id).await?;
        if membership.role == MemberRole::Admin {
            return Err(AppError::BadRequest("The user is already an admin".to_string()));
        }

        MembershipRepository::new(self.db)
            .set_role(community_id, user_id, MemberRole::Admin)
            .await?;

        Ok(Membership {
            role: MemberRole::Admin,
            ..membership
        })
    }

    /// Demotes an admin to member, never the last admin.
    pub async fn demote(&self, community_id: i32, user_id: i32) -> Result<Membership, AppError> {
        let repo = MembershipRepository::new(self.db);
        let membership = self.membership(community_id, user_id).await?;
        if membership.role != MemberRole::Admin {
            return Err(AppError::BadRequest("The user is not an admin".to_string()));
        }
        if repo.count_admins(community_id).await? <= 1 {
            return Err(AppError::BadRequest(
                "The last admin cannot be demoted".to_string(),
            ));
        }

        repo.set_role(community_id, user_id, MemberRole::Member)
            .await?;

        Ok(Membership {
            role: MemberRole::Member,
            ..membership
        })
    }

    /// Removes another member from the group. Admins leave through `leave`.
    pub async fn remove_member(
        &self,
        community_id: i32,
        actor_id: i32,
        user_id: i32,
    ) -> Result<Membership, AppError> {
        if actor_id == user_id {
            return Err(AppError::BadRequest(
                "Use leave to remove yourself from a group".to_string(),
            ));
        }
        let repo = MembershipRepository::new(self.db);
        let membership = self.membership(community_id, user_id).await?;
        if membership.role == MemberRole::Admin && repo.count_admins(community_id).await? <= 1 {
            return Err(AppError::BadRequest(
                "The last admin cannot be removed".to_string(),
            ));
        }

        repo.remove(community_id, user_id).await?;

        Ok(membership)
    }

    async fn membership(&self, community_id: i32, user_id: i32) -> Result<Membership, AppError> {
        MembershipRepository::new(self.db)
            .find(community_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))
    }

    fn ensure_pending(request: &JoinRequest) -> Result<(), AppError> {
        if request.status != JoinRequestStatus::Pending {
            return Err(already_resolved());
        }
        Ok(())
    }
}

fn already_resolved() -> AppError {
    AppError::BadRequest("This join request was already resolved".to_string())
}
