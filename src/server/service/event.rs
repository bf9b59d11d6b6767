//! Group events and their participant lists.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::event::EventRepository,
    error::AppError,
    model::{
        event::{Event, EventSummary, SaveEventParams},
        user::User,
    },
    service::community::CommunityService,
    util::db::map_unique_violation,
};

const ALREADY_JOINED: &str = "You are already registered for this event";

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event; the organizer is registered as its first participant.
    pub async fn create(
        &self,
        community_id: i32,
        organizer_id: i32,
        params: SaveEventParams,
        now: DateTime<Utc>,
    ) -> Result<EventSummary, AppError> {
        params.validate(now)?;

        let event = EventRepository::new(self.db)
            .create(community_id, organizer_id, params)
            .await?;
        tracing::debug!(
            "User {} created event {} in group {}",
            organizer_id,
            event.id,
            community_id
        );

        self.summary(event.id, organizer_id).await
    }

    pub async fn list_upcoming(
        &self,
        community_id: i32,
        viewer_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, AppError> {
        Ok(EventRepository::new(self.db)
            .get_upcoming_by_community(community_id, viewer_id, now)
            .await?)
    }

    pub async fn list_mine(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, AppError> {
        Ok(EventRepository::new(self.db)
            .get_upcoming_for_user(user_id, now)
            .await?)
    }

    pub async fn get(&self, event_id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    pub async fn summary(&self, event_id: i32, viewer_id: i32) -> Result<EventSummary, AppError> {
        EventRepository::new(self.db)
            .get_summary(event_id, viewer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// Registers a user for an upcoming event.
    ///
    /// # Returns
    /// - `Ok(EventSummary)` - Event with the new participant counted
    /// - `Err(AppError::BadRequest)` - Event already started or is full
    /// - `Err(AppError::Conflict)` - User is already registered
    pub async fn join(
        &self,
        event: &Event,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<EventSummary, AppError> {
        if event.starts_at <= now {
            return Err(AppError::BadRequest(
                "This event has already started".to_string(),
            ));
        }

        let summary = self.summary(event.id, user_id).await?;
        if summary.joined {
            return Err(AppError::Conflict(ALREADY_JOINED.to_string()));
        }
        if summary.is_full() {
            return Err(AppError::BadRequest("This event is full".to_string()));
        }

        EventRepository::new(self.db)
            .add_participant(event.id, user_id)
            .await
            .map_err(|e| map_unique_violation(e, ALREADY_JOINED))?;

        self.summary(event.id, user_id).await
    }

    pub async fn leave(&self, event: &Event, user_id: i32) -> Result<EventSummary, AppError> {
        if !EventRepository::new(self.db)
            .remove_participant(event.id, user_id)
            .await?
        {
            return Err(AppError::NotFound(
                "You are not registered for this event".to_string(),
            ));
        }

        self.summary(event.id, user_id).await
    }

    /// Replaces an event's details. Allowed for the organizer and group moderators.
    ///
    /// # Returns
    /// - `Ok(EventSummary)` - Updated event
    /// - `Err(AppError::BadRequest)` - Validation failed, or the new limit is below the
    ///   current participant count
    /// - `Err(AppError::Forbidden)` - Caller is neither organizer nor group admin
    pub async fn update(
        &self,
        event: &Event,
        user: &User,
        params: SaveEventParams,
        now: DateTime<Utc>,
    ) -> Result<EventSummary, AppError> {
        self.ensure_can_manage(event, user).await?;
        params.validate(now)?;

        let repo = EventRepository::new(self.db);
        let count = repo.participant_count(event.id).await?;
        if params
            .max_participants
            .is_some_and(|max| (max as u64) < count)
        {
            return Err(AppError::BadRequest(
                "The participant limit cannot be lower than the current participant count"
                    .to_string(),
            ));
        }

        repo.update(event.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.summary(event.id, user.id).await
    }

    pub async fn delete(&self, event: &Event, user: &User) -> Result<(), AppError> {
        self.ensure_can_manage(event, user).await?;

        EventRepository::new(self.db).delete(event.id).await?;
        tracing::debug!("Event {} deleted by user {}", event.id, user.id);

        Ok(())
    }

    async fn ensure_can_manage(&self, event: &Event, user: &User) -> Result<(), AppError> {
        if event.organizer_id == user.id
            || CommunityService::new(self.db)
                .is_moderator(event.community_id, user)
                .await?
        {
            return Ok(());
        }
        Err(AppError::Forbidden(
            "Only the organizer or a group admin can do this".to_string(),
        ))
    }
}
