//! Group polls.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::poll::PollRepository,
    error::AppError,
    model::{
        poll::{CreatePollParams, Poll, PollResults},
        user::User,
    },
    service::community::CommunityService,
    util::db::map_unique_violation,
};

pub struct PollService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a poll with its options in the given order.
    ///
    /// # Returns
    /// - `Ok(PollResults)` - The new poll with zero votes
    /// - `Err(AppError::BadRequest)` - Question, options or deadline are invalid
    pub async fn create(
        &self,
        params: CreatePollParams,
        now: DateTime<Utc>,
    ) -> Result<PollResults, AppError> {
        params.validate(now)?;

        let creator_id = params.creator_id;
        let poll = PollRepository::new(self.db).create(params).await?;
        tracing::debug!(
            "User {} created poll {} in group {}",
            creator_id,
            poll.id,
            poll.community_id
        );

        self.results(poll.id, creator_id).await
    }

    pub async fn list(
        &self,
        community_id: i32,
        viewer_id: i32,
    ) -> Result<Vec<PollResults>, AppError> {
        Ok(PollRepository::new(self.db)
            .get_results_by_community(community_id, viewer_id)
            .await?)
    }

    pub async fn get(&self, poll_id: i32) -> Result<Poll, AppError> {
        PollRepository::new(self.db)
            .find_by_id(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
    }

    pub async fn results(&self, poll_id: i32, viewer_id: i32) -> Result<PollResults, AppError> {
        PollRepository::new(self.db)
            .get_results(poll_id, viewer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
    }

    /// Records a vote. Each user votes once per poll.
    ///
    /// # Returns
    /// - `Ok(PollResults)` - Updated counts including the new vote
    /// - `Err(AppError::BadRequest)` - Poll is closed or the option belongs to another poll
    /// - `Err(AppError::Conflict)` - The user already voted
    pub async fn vote(
        &self,
        poll: &Poll,
        option_id: i32,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<PollResults, AppError> {
        if !poll.is_open(now) {
            return Err(AppError::BadRequest("This poll is closed".to_string()));
        }

        let repo = PollRepository::new(self.db);
        if !repo.option_belongs_to(poll.id, option_id).await? {
            return Err(AppError::BadRequest(
                "The option does not belong to this poll".to_string(),
            ));
        }
        if repo.find_vote(poll.id, user_id).await?.is_some() {
            return Err(AppError::Conflict("You already voted".to_string()));
        }

        repo.vote(poll.id, option_id, user_id)
            .await
            .map_err(|e| map_unique_violation(e, "You already voted"))?;

        self.results(poll.id, user_id).await
    }

    /// Closes a poll. Allowed for its creator and the group's moderators.
    pub async fn close(&self, poll: &Poll, user: &User) -> Result<PollResults, AppError> {
        self.ensure_can_manage(poll, user).await?;
        if poll.closed {
            return Err(AppError::BadRequest("This poll is already closed".to_string()));
        }

        PollRepository::new(self.db).close(poll.id).await?;

        self.results(poll.id, user.id).await
    }

    /// Deletes a poll with its options and votes.
    pub async fn delete(&self, poll: &Poll, user: &User) -> Result<(), AppError> {
        self.ensure_can_manage(poll, user).await?;

        PollRepository::new(self.db).delete(poll.id).await?;
        tracing::debug!("Poll {} deleted by user {}", poll.id, user.id);

        Ok(())
    }

    /// Closes every open poll whose deadline has passed.
    ///
    /// # Returns
    /// - `Ok(Vec<(i32, i32)>)` - `(poll_id, community_id)` of each poll closed
    pub async fn close_expired(&self, now: DateTime<Utc>) -> Result<Vec<(i32, i32)>, AppError> {
        Ok(PollRepository::new(self.db).close_expired(now).await?)
    }

    async fn ensure_can_manage(&self, poll: &Poll, user: &User) -> Result<(), AppError> {
        if poll.creator_id == user.id
            || CommunityService::new(self.db)
                .is_moderator(poll.community_id, user)
                .await?
        {
            return Ok(());
        }
        Err(AppError::Forbidden(
            "Only the poll creator or a group admin can do this".to_string(),
        ))
    }
}
