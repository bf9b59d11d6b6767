//! Game library domain models, parameters and the in-memory listing query.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::{
    model::game::{GameDto, GameQueryDto, GameSortDto, SaveGameDto, SortDirectionDto},
    server::{
        error::AppError,
        model::storage::storage_url,
        util::text::{contains_ignore_case, normalize_optional},
    },
};

const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
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
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn from_entity(entity: entity::game::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            title: entity.title,
            publisher: entity.publisher,
            release_year: entity.release_year,
            min_players: entity.min_players,
            max_players: entity.max_players,
            play_time_minutes: entity.play_time_minutes,
            min_age: entity.min_age,
            notes: entity.notes,
            image_path: entity.image_path,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GameDto {
        GameDto {
            image_url: storage_url(self.image_path.as_deref()),
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            publisher: self.publisher,
            release_year: self.release_year,
            min_players: self.min_players,
            max_players: self.max_players,
            play_time_minutes: self.play_time_minutes,
            min_age: self.min_age,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

/// Fields of a game as entered by its owner, used for both create and update.
#[derive(Debug, Clone)]
pub struct SaveGameParams {
    pub title: String,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub min_players: i32,
    pub max_players: i32,
    pub play_time_minutes: Option<i32>,
    pub min_age: Option<i32>,
    pub notes: Option<String>,
}

impl SaveGameParams {
    /// Normalizes text fields; blank optional text becomes `None`.
    pub fn from_dto(dto: SaveGameDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            publisher: normalize_optional(dto.publisher),
            release_year: dto.release_year,
            min_players: dto.min_players,
            max_players: dto.max_players,
            play_time_minutes: dto.play_time_minutes,
            min_age: dto.min_age,
            notes: normalize_optional(dto.notes),
        }
    }

    /// Checks the title and the numeric ranges.
    ///
    /// # Returns
    /// - `Ok(())` - Fields are valid
    /// - `Err(AppError::BadRequest)` - First violated rule
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if self.min_players < 1 || self.min_players > self.max_players {
            return Err(AppError::BadRequest(
                "Player count must satisfy 1 <= min <= max".to_string(),
            ));
        }
        if self.play_time_minutes.is_some_and(|t| t < 0) {
            return Err(AppError::BadRequest(
                "Play time cannot be negative".to_string(),
            ));
        }
        if self.min_age.is_some_and(|a| a < 0) {
            return Err(AppError::BadRequest("Minimum age cannot be negative".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameSort {
    Title,
    Players,
    PlayTime,
    #[default]
    Added,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Search, player filter and sort applied to an already fetched library.
#[derive(Debug, Clone, Default)]
pub struct GameQuery {
    /// Case-insensitive substring matched against title and publisher.
    pub search: Option<String>,
    /// Player count the game must support.
    pub players: Option<i32>,
    pub sort: GameSort,
    pub direction: SortDirection,
}

impl GameQuery {
    pub fn from_dto(dto: GameQueryDto) -> Self {
        Self {
            search: normalize_optional(dto.search),
            players: dto.players,
            sort: match dto.sort {
                GameSortDto::Title => GameSort::Title,
                GameSortDto::Players => GameSort::Players,
                GameSortDto::PlayTime => GameSort::PlayTime,
                GameSortDto::Added => GameSort::Added,
            },
            direction: match dto.direction {
                SortDirectionDto::Asc => SortDirection::Asc,
                SortDirectionDto::Desc => SortDirection::Desc,
            },
        }
    }

    fn matches(&self, game: &Game) -> bool {
        if let Some(search) = &self.search {
            let in_title = contains_ignore_case(&game.title, search);
            let in_publisher = game
                .publisher
                .as_deref()
                .is_some_and(|p| contains_ignore_case(p, search));
            if !in_title && !in_publisher {
                return false;
            }
        }
        if let Some(players) = self.players {
            if players < game.min_players || players > game.max_players {
                return false;
            }
        }
        true
    }

    fn compare(&self, a: &Game, b: &Game) -> Ordering {
        let ordering = match self.sort {
            GameSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            GameSort::Players => (a.min_players, a.max_players).cmp(&(b.min_players, b.max_players)),
            // Games without a play time go last in both directions
            GameSort::PlayTime => {
                return match (a.play_time_minutes, b.play_time_minutes) {
                    (Some(x), Some(y)) => self.directed(x.cmp(&y)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
            }
            GameSort::Added => a.created_at.cmp(&b.created_at),
        };
        self.directed(ordering)
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Filters and sorts `games`. The sort is stable, so equal keys keep fetch order.
    pub fn apply(&self, games: Vec<Game>) -> Vec<Game> {
        let mut games: Vec<Game> = games.into_iter().filter(|g| self.matches(g)).collect();
        games.sort_by(|a, b| self.compare(a, b));
        games
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn game(id: i32, title: &str, players: (i32, i32), play_time: Option<i32>) -> Game {
        Game {
            id,
            owner_id: 1,
            title: title.to_string(),
            publisher: None,
            release_year: None,
            min_players: players.0,
            max_players: players.1,
            play_time_minutes: play_time,
            min_age: None,
            notes: None,
            image_path: None,
            created_at: Utc::now() + Duration::minutes(id as i64),
        }
    }

    fn ids(games: &[Game]) -> Vec<i32> {
        games.iter().map(|g| g.id).collect()
    }

    fn library() -> Vec<Game> {
        vec![
            game(1, "Catan", (3, 4), Some(90)),
            game(2, "azul", (2, 4), Some(45)),
            game(3, "Terraforming Mars", (1, 5), None),
            game(4, "Codenames", (4, 8), Some(15)),
        ]
    }

    #[test]
    fn search_matches_title_and_publisher_ignoring_case() {
        let mut games = library();
        games[3].publisher = Some("Czech Games Edition".to_string());

        let query = GameQuery {
            search: Some("CZECH".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(games.clone())), vec![4]);

        let query = GameQuery {
            search: Some("mars".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(games)), vec![3]);
    }

    #[test]
    fn player_filter_requires_count_within_range() {
        let query = GameQuery {
            players: Some(2),
            sort: GameSort::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(library())), vec![2, 3]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let query = GameQuery {
            sort: GameSort::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(library())), vec![2, 1, 4, 3]);
    }

    #[test]
    fn missing_play_time_sorts_last_in_both_directions() {
        let asc = GameQuery {
            sort: GameSort::PlayTime,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&asc.apply(library())), vec![4, 2, 1, 3]);

        let desc = GameQuery {
            sort: GameSort::PlayTime,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(ids(&desc.apply(library())), vec![1, 2, 4, 3]);
    }

    #[test]
    fn default_query_lists_newest_first() {
        assert_eq!(ids(&GameQuery::default().apply(library())), vec![4, 3, 2, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let games = vec![
            game(1, "Same", (2, 4), Some(30)),
            game(2, "Same", (2, 4), Some(30)),
            game(3, "Same", (2, 4), Some(30)),
        ];
        let query = GameQuery {
            sort: GameSort::Players,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(games)), vec![1, 2, 3]);
    }

    #[test]
    fn validation_rejects_inverted_player_range() {
        let params = SaveGameParams {
            title: "Catan".to_string(),
            publisher: None,
            release_year: None,
            min_players: 5,
            max_players: 4,
            play_time_minutes: None,
            min_age: None,
            notes: None,
        };
        assert!(matches!(params.validate(), Err(AppError::BadRequest(_))));
    }
}
