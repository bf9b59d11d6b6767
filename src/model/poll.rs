use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreatePollDto {
    pub question: String,
    pub options: Vec<String>,
    pub closes_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PollOptionDto {
    pub id: i32,
    pub label: String,
    pub votes: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PollDto {
    pub id: i32,
    pub community_id: i32,
    pub creator_id: i32,
    pub question: String,
    pub options: Vec<PollOptionDto>,
    pub total_votes: u64,
    /// Option the caller voted for, if any.
    pub my_vote: Option<i32>,
    pub closes_at: Option<DateTime<Utc>>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct VoteDto {
    pub option_id: i32,
}
