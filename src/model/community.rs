use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalModeDto {
    /// Anyone may join directly.
    Open,
    /// Joining creates a request that a group admin must approve.
    Moderated,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemberRoleDto {
    Admin,
    Member,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JoinRequestStatusDto {
    Pending,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CommunityDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub approval_mode: ApprovalModeDto,
    pub max_members: Option<i32>,
    pub creator_id: i32,
    pub image_url: Option<String>,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SaveCommunityDto {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub approval_mode: ApprovalModeDto,
    pub max_members: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MemberDto {
    pub user: UserSummaryDto,
    pub role: MemberRoleDto,
    pub joined_at: DateTime<Utc>,
}

/// Group page: the group, its members and the caller's relation to it.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CommunityDetailDto {
    pub community: CommunityDto,
    pub members: Vec<MemberDto>,
    pub my_role: Option<MemberRoleDto>,
    pub has_pending_request: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct JoinCommunityDto {
    pub message: Option<String>,
}

/// Outcome of a join attempt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JoinResultDto {
    Joined { role: MemberRoleDto },
    Requested { request_id: i32 },
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct JoinRequestDto {
    pub id: i32,
    pub community_id: i32,
    pub community_name: String,
    pub user: UserSummaryDto,
    pub message: Option<String>,
    pub status: JoinRequestStatusDto,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CommunitySearchDto {
    pub search: Option<String>,
}
