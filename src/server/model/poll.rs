use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::{
    model::poll::{CreatePollDto, PollDto, PollOptionDto},
    server::error::AppError,
};

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Poll {
    pub id: i32,
    pub community_id: i32,
    pub creator_id: i32,
    pub question: String,
    pub closes_at: Option<DateTime<Utc>>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    pub fn from_entity(entity: entity::poll::Model) -> Self {
        Self {
            id: entity.id,
            community_id: entity.community_id,
            creator_id: entity.creator_id,
            question: entity.question,
            closes_at: entity.closes_at,
            closed: entity.closed,
            created_at: entity.created_at,
        }
    }

    /// Whether votes are still accepted at `now`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        !self.closed && self.closes_at.is_none_or(|closes_at| closes_at > now)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollOptionResult {
    pub id: i32,
    pub label: String,
    pub votes: u64,
}

/// Poll with per-option vote counts as seen by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResults {
    pub poll: Poll,
    /// Options ordered by position.
    pub options: Vec<PollOptionResult>,
    pub my_vote: Option<i32>,
}

impl PollResults {
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.votes).sum()
    }

    pub fn into_dto(self) -> PollDto {
        let total_votes = self.total_votes();
        PollDto {
            id: self.poll.id,
            community_id: self.poll.community_id,
            creator_id: self.poll.creator_id,
            question: self.poll.question,
            options: self
                .options
                .into_iter()
                .map(|o| PollOptionDto {
                    id: o.id,
                    label: o.label,
                    votes: o.votes,
                })
                .collect(),
            total_votes,
            my_vote: self.my_vote,
            closes_at: self.poll.closes_at,
            closed: self.poll.closed,
            created_at: self.poll.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePollParams {
    pub community_id: i32,
    pub creator_id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub closes_at: Option<DateTime<Utc>>,
}

impl CreatePollParams {
    pub fn from_dto(community_id: i32, creator_id: i32, dto: CreatePollDto) -> Self {
        Self {
            community_id,
            creator_id,
            question: dto.question.trim().to_string(),
            options: dto.options.iter().map(|o| o.trim().to_string()).collect(),
            closes_at: dto.closes_at,
        }
    }

    /// Checks the question, the option list and the deadline against `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.question.is_empty() {
            return Err(AppError::BadRequest("Question is required".to_string()));
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options.len()) {
            return Err(AppError::BadRequest(format!(
                "A poll needs between {} and {} options",
                MIN_OPTIONS, MAX_OPTIONS
            )));
        }
        if self.options.iter().any(|o| o.is_empty()) {
            return Err(AppError::BadRequest("Options cannot be empty".to_string()));
        }
        let distinct: HashSet<String> = self.options.iter().map(|o| o.to_lowercase()).collect();
        if distinct.len() != self.options.len() {
            return Err(AppError::BadRequest("Options must be distinct".to_string()));
        }
        if self.closes_at.is_some_and(|c| c <= now) {
            return Err(AppError::BadRequest(
                "Closing time must be in the future".to_string(),
            ));
        }
        Ok(())
    }
}
