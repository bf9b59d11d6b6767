use chrono::{DateTime, Utc};

use crate::{
    model::friend::{FriendDto, FriendRequestDto},
    server::{error::internal::InternalError, model::user::User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(InternalError::UnknownColumnValue {
                column: "friendship.status",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Friendship {
    pub id: i32,
    pub requester_id: i32,
    pub addressee_id: i32,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn from_entity(entity: entity::friendship::Model) -> Result<Self, InternalError> {
        Ok(Self {
            status: FriendshipStatus::from_column(&entity.status)?,
            id: entity.id,
            requester_id: entity.requester_id,
            addressee_id: entity.addressee_id,
            created_at: entity.created_at,
        })
    }

    /// Whether `user_id` is one of the two parties.
    pub fn involves(&self, user_id: i32) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    /// Id of the party that is not `user_id`.
    pub fn other_party(&self, user_id: i32) -> i32 {
        if self.requester_id == user_id {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}

/// A friendship paired with the other party's user row.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendEntry {
    pub friendship: Friendship,
    pub user: User,
}

impl FriendEntry {
    pub fn into_friend_dto(self) -> FriendDto {
        FriendDto {
            friendship_id: self.friendship.id,
            user: self.user.to_summary_dto(),
            since: self.friendship.created_at,
        }
    }

    pub fn into_request_dto(self) -> FriendRequestDto {
        FriendRequestDto {
            id: self.friendship.id,
            user: self.user.to_summary_dto(),
            created_at: self.friendship.created_at,
        }
    }
}
