use chrono::{DateTime, Utc};

use crate::{
    model::event::{EventDto, SaveEventDto},
    server::{error::AppError, util::text::normalize_optional},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub community_id: i32,
    pub organizer_id: i32,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            community_id: entity.community_id,
            organizer_id: entity.organizer_id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            starts_at: entity.starts_at,
            max_participants: entity.max_participants,
            created_at: entity.created_at,
        }
    }
}

/// Event with its participant count and whether the viewing user is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub event: Event,
    pub participant_count: u64,
    pub joined: bool,
}

impl EventSummary {
    pub fn is_full(&self) -> bool {
        self.event
            .max_participants
            .is_some_and(|max| self.participant_count >= max.max(0) as u64)
    }

    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.event.id,
            community_id: self.event.community_id,
            organizer_id: self.event.organizer_id,
            title: self.event.title,
            description: self.event.description,
            location: self.event.location,
            starts_at: self.event.starts_at,
            max_participants: self.event.max_participants,
            participant_count: self.participant_count,
            joined: self.joined,
            created_at: self.event.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveEventParams {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub max_participants: Option<i32>,
}

impl SaveEventParams {
    pub fn from_dto(dto: SaveEventDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            location: normalize_optional(dto.location),
            starts_at: dto.starts_at,
            max_participants: dto.max_participants,
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if self.starts_at <= now {
            return Err(AppError::BadRequest(
                "Event must start in the future".to_string(),
            ));
        }
        if self.max_participants.is_some_and(|m| m < 1) {
            return Err(AppError::BadRequest(
                "Participant limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
