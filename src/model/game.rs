use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GameDto {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub min_players: i32,
    pub max_players: i32,
    pub play_time_minutes: Option<i32>,
    pub min_age: Option<i32>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for creating a game, and for replacing its fields on update.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SaveGameDto {
    pub title: String,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub min_players: i32,
    pub max_players: i32,
    pub play_time_minutes: Option<i32>,
    pub min_age: Option<i32>,
    pub notes: Option<String>,
}

/// Sort key of a library listing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameSortDto {
    Title,
    Players,
    PlayTime,
    #[default]
    Added,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirectionDto {
    Asc,
    #[default]
    Desc,
}

/// Query string of the library listing endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GameQueryDto {
    pub search: Option<String>,
    pub players: Option<i32>,
    #[serde(default)]
    pub sort: GameSortDto,
    #[serde(default)]
    pub direction: SortDirectionDto,
}
