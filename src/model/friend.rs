use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserSummaryDto;

/// Accepted friendship seen from one side.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FriendDto {
    pub friendship_id: i32,
    pub user: UserSummaryDto,
    pub since: DateTime<Utc>,
}

/// Pending request; `user` is the other party.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FriendRequestDto {
    pub id: i32,
    pub user: UserSummaryDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FriendRequestsDto {
    pub incoming: Vec<FriendRequestDto>,
    pub outgoing: Vec<FriendRequestDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SendFriendRequestDto {
    pub user_id: i32,
}
