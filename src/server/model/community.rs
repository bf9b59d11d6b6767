//! Community (group) domain models: groups, memberships and join requests.

use chrono::{DateTime, Utc};

use crate::{
    model::community::{
        ApprovalModeDto, CommunityDetailDto, CommunityDto, JoinRequestDto, JoinRequestStatusDto,
        JoinResultDto, MemberDto, MemberRoleDto, SaveCommunityDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::{storage::storage_url, user::User},
        util::text::normalize_optional,
    },
};

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalMode {
    Open,
    Moderated,
}

impl ApprovalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Moderated => "moderated",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "open" => Ok(Self::Open),
            "moderated" => Ok(Self::Moderated),
            _ => Err(InternalError::UnknownColumnValue {
                column: "community.approval_mode",
                value: value.to_string(),
            }),
        }
    }

    pub fn from_dto(dto: ApprovalModeDto) -> Self {
        match dto {
            ApprovalModeDto::Open => Self::Open,
            ApprovalModeDto::Moderated => Self::Moderated,
        }
    }

    pub fn into_dto(self) -> ApprovalModeDto {
        match self {
            Self::Open => ApprovalModeDto::Open,
            Self::Moderated => ApprovalModeDto::Moderated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(InternalError::UnknownColumnValue {
                column: "community_member.role",
                value: value.to_string(),
            }),
        }
    }

    pub fn into_dto(self) -> MemberRoleDto {
        match self {
            Self::Admin => MemberRoleDto::Admin,
            Self::Member => MemberRoleDto::Member,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(InternalError::UnknownColumnValue {
                column: "join_request.status",
                value: value.to_string(),
            }),
        }
    }

    pub fn into_dto(self) -> JoinRequestStatusDto {
        match self {
            Self::Pending => JoinRequestStatusDto::Pending,
            Self::Approved => JoinRequestStatusDto::Approved,
            Self::Rejected => JoinRequestStatusDto::Rejected,
        }
    }
}

/// Group together with its current member count.
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub approval_mode: ApprovalMode,
    pub max_members: Option<i32>,
    pub creator_id: i32,
    pub image_path: Option<String>,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Community {
    pub fn from_entity(
        entity: entity::community::Model,
        member_count: u64,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            approval_mode: ApprovalMode::from_column(&entity.approval_mode)?,
            id: entity.id,
            name: entity.name,
            description: entity.description,
            location: entity.location,
            max_members: entity.max_members,
            creator_id: entity.creator_id,
            image_path: entity.image_path,
            member_count,
            created_at: entity.created_at,
        })
    }

    /// Whether the member limit is reached.
    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|max| self.member_count >= max.max(0) as u64)
    }

    pub fn into_dto(self) -> CommunityDto {
        CommunityDto {
            image_url: storage_url(self.image_path.as_deref()),
            id: self.id,
            name: self.name,
            description: self.description,
            location: self.location,
            approval_mode: self.approval_mode.into_dto(),
            max_members: self.max_members,
            creator_id: self.creator_id,
            member_count: self.member_count,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn from_entity(entity: entity::community_member::Model) -> Result<Self, InternalError> {
        Ok(Self {
            role: MemberRole::from_column(&entity.role)?,
            id: entity.id,
            community_id: entity.community_id,
            user_id: entity.user_id,
            joined_at: entity.joined_at,
        })
    }
}

/// Membership with the member's user row, as shown on the group page.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub membership: Membership,
    pub user: User,
}

impl Member {
    pub fn into_dto(self) -> MemberDto {
        MemberDto {
            user: self.user.to_summary_dto(),
            role: self.membership.role.into_dto(),
            joined_at: self.membership.joined_at,
        }
    }
}

/// Group page seen by a particular user.
#[derive(Debug, Clone)]
pub struct CommunityDetail {
    pub community: Community,
    /// Admins first, then by join date.
    pub members: Vec<Member>,
    pub my_role: Option<MemberRole>,
    pub has_pending_request: bool,
}

impl CommunityDetail {
    pub fn into_dto(self) -> CommunityDetailDto {
        CommunityDetailDto {
            community: self.community.into_dto(),
            members: self.members.into_iter().map(Member::into_dto).collect(),
            my_role: self.my_role.map(MemberRole::into_dto),
            has_pending_request: self.has_pending_request,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinRequest {
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<i32>,
}

impl JoinRequest {
    pub fn from_entity(entity: entity::join_request::Model) -> Result<Self, InternalError> {
        Ok(Self {
            status: JoinRequestStatus::from_column(&entity.status)?,
            id: entity.id,
            community_id: entity.community_id,
            user_id: entity.user_id,
            message: entity.message,
            created_at: entity.created_at,
            resolved_at: entity.resolved_at,
            resolved_by: entity.resolved_by,
        })
    }
}

/// Join request with the requesting user and the group name for display.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRequestEntry {
    pub request: JoinRequest,
    pub user: User,
    pub community_name: String,
}

impl JoinRequestEntry {
    pub fn into_dto(self) -> JoinRequestDto {
        JoinRequestDto {
            id: self.request.id,
            community_id: self.request.community_id,
            community_name: self.community_name,
            user: self.user.to_summary_dto(),
            message: self.request.message,
            status: self.request.status.into_dto(),
            created_at: self.request.created_at,
            resolved_at: self.request.resolved_at,
        }
    }
}

/// Outcome of joining a group.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    Joined(Membership),
    Requested(JoinRequest),
}

impl JoinOutcome {
    pub fn into_dto(self) -> JoinResultDto {
        match self {
            Self::Joined(membership) => JoinResultDto::Joined {
                role: membership.role.into_dto(),
            },
            Self::Requested(request) => JoinResultDto::Requested {
                request_id: request.id,
            },
        }
    }
}

/// Fields of a group as entered by its admin, used for both create and update.
#[derive(Debug, Clone)]
pub struct SaveCommunityParams {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub approval_mode: ApprovalMode,
    pub max_members: Option<i32>,
}

impl SaveCommunityParams {
    pub fn from_dto(dto: SaveCommunityDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            location: normalize_optional(dto.location),
            approval_mode: ApprovalMode::from_dto(dto.approval_mode),
            max_members: dto.max_members,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let length = self.name.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(AppError::BadRequest(format!(
                "Group name must be between {} and {} characters",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            )));
        }
        if self.max_members.is_some_and(|m| m < 2) {
            return Err(AppError::BadRequest(
                "A group must allow at least 2 members".to_string(),
            ));
        }
        Ok(())
    }
}
