//! Game factory for library tests.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating games owned by a user.
pub struct GameFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    title: String,
    publisher: Option<String>,
    min_players: i32,
    max_players: i32,
    play_time_minutes: Option<i32>,
    created_at: DateTime<Utc>,
}

impl<'a> GameFactory<'a> {
    /// Defaults: title `"Game {id}"`, 2-4 players, 60 minutes, no publisher.
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        Self {
            db,
            owner_id,
            title: format!("Game {}", next_id()),
            publisher: None,
            min_players: 2,
            max_players: 4,
            play_time_minutes: Some(60),
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn players(mut self, min: i32, max: i32) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    pub fn play_time(mut self, minutes: Option<i32>) -> Self {
        self.play_time_minutes = minutes;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::game::Model, DbErr> {
        entity::game::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            title: ActiveValue::Set(self.title),
            publisher: ActiveValue::Set(self.publisher),
            release_year: ActiveValue::Set(None),
            min_players: ActiveValue::Set(self.min_players),
            max_players: ActiveValue::Set(self.max_players),
            play_time_minutes: ActiveValue::Set(self.play_time_minutes),
            min_age: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            image_path: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a game with default values for the given owner.
pub async fn create_game(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::game::Model, DbErr> {
    GameFactory::new(db, owner_id).build().await
}
