//! Event factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    community_id: i32,
    organizer_id: i32,
    title: String,
    starts_at: DateTime<Utc>,
    max_participants: Option<i32>,
}

impl<'a> EventFactory<'a> {
    /// Defaults: title `"Game night {id}"`, starts in 7 days, no participant limit.
    pub fn new(db: &'a DatabaseConnection, community_id: i32, organizer_id: i32) -> Self {
        Self {
            db,
            community_id,
            organizer_id,
            title: format!("Game night {}", next_id()),
            starts_at: Utc::now() + Duration::days(7),
            max_participants: None,
        }
    }

    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub fn max_participants(mut self, max: Option<i32>) -> Self {
        self.max_participants = max;
        self
    }

    /// Inserts the event without registering anyone.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            community_id: ActiveValue::Set(self.community_id),
            organizer_id: ActiveValue::Set(self.organizer_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(String::new()),
            location: ActiveValue::Set(None),
            starts_at: ActiveValue::Set(self.starts_at),
            max_participants: ActiveValue::Set(self.max_participants),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Registers `user_id` for `event_id`.
pub async fn add_participant(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    entity::event_participant::ActiveModel {
        event_id: ActiveValue::Set(event_id),
        user_id: ActiveValue::Set(user_id),
        joined_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
