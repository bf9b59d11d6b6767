use crate::server::{data::game::GameRepository, model::game::SaveGameParams};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_by_owner;
mod update;

fn params(title: &str) -> SaveGameParams {
    SaveGameParams {
        title: title.to_string(),
        publisher: Some("Z-Man".to_string()),
        release_year: Some(2008),
        min_players: 2,
        max_players: 4,
        play_time_minutes: Some(45),
        min_age: Some(8),
        notes: None,
    }
}
