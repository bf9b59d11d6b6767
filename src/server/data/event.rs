//! Event repository: group events and their participants.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

use crate::server::model::event::{Event, EventSummary, SaveEventParams};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an event and registers its organizer in one transaction.
    pub async fn create(
        &self,
        community_id: i32,
        organizer_id: i32,
        params: SaveEventParams,
    ) -> Result<Event, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let event = entity::event::ActiveModel {
            community_id: ActiveValue::Set(community_id),
            organizer_id: ActiveValue::Set(organizer_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            starts_at: ActiveValue::Set(params.starts_at),
            max_participants: ActiveValue::Set(params.max_participants),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        entity::event_participant::ActiveModel {
            event_id: ActiveValue::Set(event.id),
            user_id: ActiveValue::Set(organizer_id),
            joined_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Event::from_entity(event))
    }

    pub async fn find_by_id(&self, event_id: i32) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Event::from_entity))
    }

    /// Event with participant count as seen by `viewer_id`.
    pub async fn get_summary(
        &self,
        event_id: i32,
        viewer_id: i32,
    ) -> Result<Option<EventSummary>, DbErr> {
        let Some(event) = entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.summaries(vec![event], viewer_id).await?.pop())
    }

    /// Events of a group starting after `now`, soonest first.
    pub async fn get_upcoming_by_community(
        &self,
        community_id: i32,
        viewer_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, DbErr> {
        let events = entity::prelude::Event::find()
            .filter(entity::event::Column::CommunityId.eq(community_id))
            .filter(entity::event::Column::StartsAt.gt(now))
            .order_by_asc(entity::event::Column::StartsAt)
            .all(self.db)
            .await?;

        self.summaries(events, viewer_id).await
    }

    /// Upcoming events `user_id` is registered for, soonest first.
    pub async fn get_upcoming_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, DbErr> {
        let event_ids: Vec<i32> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = entity::prelude::Event::find()
            .filter(entity::event::Column::Id.is_in(event_ids))
            .filter(entity::event::Column::StartsAt.gt(now))
            .order_by_asc(entity::event::Column::StartsAt)
            .all(self.db)
            .await?;

        self.summaries(events, user_id).await
    }

    async fn summaries(
        &self,
        events: Vec<entity::event::Model>,
        viewer_id: i32,
    ) -> Result<Vec<EventSummary>, DbErr> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let event_ids: Vec<i32> = events.iter().map(|e| e.id).collect();

        let counts: HashMap<i32, u64> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .column_as(entity::event_participant::Column::Id.count(), "participant_count")
            .filter(entity::event_participant::Column::EventId.is_in(event_ids.clone()))
            .group_by(entity::event_participant::Column::EventId)
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await?
            .into_iter()
            .map(|(id, count)| (id, count.max(0) as u64))
            .collect();

        let joined: HashSet<i32> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::EventId.is_in(event_ids))
            .filter(entity::event_participant::Column::UserId.eq(viewer_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        Ok(events
            .into_iter()
            .map(|event| EventSummary {
                participant_count: counts.get(&event.id).copied().unwrap_or(0),
                joined: joined.contains(&event.id),
                event: Event::from_entity(event),
            })
            .collect())
    }

    pub async fn participant_count(&self, event_id: i32) -> Result<u64, DbErr> {
        entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .count(self.db)
            .await
    }

    pub async fn add_participant(&self, event_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::event_participant::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            joined_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(())
    }

    /// # Returns
    /// - `Ok(true)` - Registration removed
    /// - `Ok(false)` - User was not registered
    pub async fn remove_participant(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EventParticipant::delete_many()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update(
        &self,
        event_id: i32,
        params: SaveEventParams,
    ) -> Result<Option<Event>, DbErr> {
        let Some(event) = entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::event::ActiveModel = event.into();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.starts_at = ActiveValue::Set(params.starts_at);
        active.max_participants = ActiveValue::Set(params.max_participants);
        let updated = active.update(self.db).await?;

        Ok(Some(Event::from_entity(updated)))
    }

    /// Deletes an event with its registrations.
    pub async fn delete(&self, event_id: i32) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::EventParticipant::delete_many()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;
        entity::prelude::Event::delete_by_id(event_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
