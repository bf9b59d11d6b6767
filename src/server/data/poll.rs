//! Poll repository: polls, their options and votes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::model::poll::{CreatePollParams, Poll, PollOptionResult, PollResults};

pub struct PollRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a poll and its options (in the given order) in one transaction.
    pub async fn create(&self, params: CreatePollParams) -> Result<Poll, DbErr> {
        let txn = self.db.begin().await?;

        let poll = entity::poll::ActiveModel {
            community_id: ActiveValue::Set(params.community_id),
            creator_id: ActiveValue::Set(params.creator_id),
            question: ActiveValue::Set(params.question),
            closes_at: ActiveValue::Set(params.closes_at),
            closed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let options: Vec<entity::poll_option::ActiveModel> = params
            .options
            .into_iter()
            .enumerate()
            .map(|(position, label)| entity::poll_option::ActiveModel {
                poll_id: ActiveValue::Set(poll.id),
                label: ActiveValue::Set(label),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            })
            .collect();
        entity::prelude::PollOption::insert_many(options)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(Poll::from_entity(poll))
    }

    pub async fn find_by_id(&self, poll_id: i32) -> Result<Option<Poll>, DbErr> {
        let entity = entity::prelude::Poll::find_by_id(poll_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Poll::from_entity))
    }

    /// Whether `option_id` is one of the options of `poll_id`.
    pub async fn option_belongs_to(&self, poll_id: i32, option_id: i32) -> Result<bool, DbErr> {
        let option = entity::prelude::PollOption::find_by_id(option_id)
            .filter(entity::poll_option::Column::PollId.eq(poll_id))
            .one(self.db)
            .await?;

        Ok(option.is_some())
    }

    /// Polls of a group, newest first, with vote counts and `viewer_id`'s votes.
    pub async fn get_results_by_community(
        &self,
        community_id: i32,
        viewer_id: i32,
    ) -> Result<Vec<PollResults>, DbErr> {
        let polls = entity::prelude::Poll::find()
            .filter(entity::poll::Column::CommunityId.eq(community_id))
            .order_by_desc(entity::poll::Column::CreatedAt)
            .order_by_desc(entity::poll::Column::Id)
            .all(self.db)
            .await?;

        self.results(polls, viewer_id).await
    }

    /// Single poll with vote counts and `viewer_id`'s vote.
    pub async fn get_results(
        &self,
        poll_id: i32,
        viewer_id: i32,
    ) -> Result<Option<PollResults>, DbErr> {
        let Some(poll) = entity::prelude::Poll::find_by_id(poll_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.results(vec![poll], viewer_id).await?.pop())
    }

    async fn results(
        &self,
        polls: Vec<entity::poll::Model>,
        viewer_id: i32,
    ) -> Result<Vec<PollResults>, DbErr> {
        if polls.is_empty() {
            return Ok(Vec::new());
        }
        let poll_ids: Vec<i32> = polls.iter().map(|p| p.id).collect();

        let options = entity::prelude::PollOption::find()
            .filter(entity::poll_option::Column::PollId.is_in(poll_ids.clone()))
            .order_by_asc(entity::poll_option::Column::Position)
            .all(self.db)
            .await?;

        let counts: HashMap<i32, u64> = entity::prelude::PollVote::find()
            .select_only()
            .column(entity::poll_vote::Column::OptionId)
            .column_as(entity::poll_vote::Column::Id.count(), "vote_count")
            .filter(entity::poll_vote::Column::PollId.is_in(poll_ids.clone()))
            .group_by(entity::poll_vote::Column::OptionId)
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await?
            .into_iter()
            .map(|(option_id, count)| (option_id, count.max(0) as u64))
            .collect();

        let my_votes: HashMap<i32, i32> = entity::prelude::PollVote::find()
            .filter(entity::poll_vote::Column::PollId.is_in(poll_ids))
            .filter(entity::poll_vote::Column::UserId.eq(viewer_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|v| (v.poll_id, v.option_id))
            .collect();

        let mut options_by_poll: HashMap<i32, Vec<PollOptionResult>> = HashMap::new();
        for option in options {
            options_by_poll
                .entry(option.poll_id)
                .or_default()
                .push(PollOptionResult {
                    id: option.id,
                    votes: counts.get(&option.id).copied().unwrap_or(0),
                    label: option.label,
                });
        }

        Ok(polls
            .into_iter()
            .map(|poll| PollResults {
                options: options_by_poll.remove(&poll.id).unwrap_or_default(),
                my_vote: my_votes.get(&poll.id).copied(),
                poll: Poll::from_entity(poll),
            })
            .collect())
    }

    /// Finds the option `user_id` voted for in `poll_id`.
    pub async fn find_vote(&self, poll_id: i32, user_id: i32) -> Result<Option<i32>, DbErr> {
        let vote = entity::prelude::PollVote::find()
            .filter(entity::poll_vote::Column::PollId.eq(poll_id))
            .filter(entity::poll_vote::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(vote.map(|v| v.option_id))
    }

    /// Records a vote. The unique (poll, user) index rejects a second vote.
    pub async fn vote(&self, poll_id: i32, option_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::poll_vote::ActiveModel {
            poll_id: ActiveValue::Set(poll_id),
            option_id: ActiveValue::Set(option_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(())
    }

    pub async fn close(&self, poll_id: i32) -> Result<(), DbErr> {
        entity::prelude::Poll::update_many()
            .filter(entity::poll::Column::Id.eq(poll_id))
            .col_expr(
                entity::poll::Column::Closed,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Closes every open poll whose deadline is at or before `now`.
    ///
    /// # Returns
    /// - `Ok(closed)` - `(poll_id, community_id)` of every poll that was closed
    pub async fn close_expired(&self, now: DateTime<Utc>) -> Result<Vec<(i32, i32)>, DbErr> {
        let expired: Vec<(i32, i32)> = entity::prelude::Poll::find()
            .select_only()
            .column(entity::poll::Column::Id)
            .column(entity::poll::Column::CommunityId)
            .filter(entity::poll::Column::Closed.eq(false))
            .filter(entity::poll::Column::ClosesAt.lte(now))
            .into_tuple()
            .all(self.db)
            .await?;

        if expired.is_empty() {
            return Ok(expired);
        }

        entity::prelude::Poll::update_many()
            .filter(entity::poll::Column::Id.is_in(expired.iter().map(|(id, _)| *id)))
            .col_expr(
                entity::poll::Column::Closed,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(expired)
    }

    /// Deletes a poll with its options and votes.
    pub async fn delete(&self, poll_id: i32) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::PollVote::delete_many()
            .filter(entity::poll_vote::Column::PollId.eq(poll_id))
            .exec(&txn)
            .await?;
        entity::prelude::PollOption::delete_many()
            .filter(entity::poll_option::Column::PollId.eq(poll_id))
            .exec(&txn)
            .await?;
        entity::prelude::Poll::delete_by_id(poll_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
