//! Game library repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::game::{Game, SaveGameParams};

pub struct GameRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, owner_id: i32, params: SaveGameParams) -> Result<Game, DbErr> {
        let entity = entity::game::ActiveModel {
            owner_id: ActiveValue::Set(owner_id),
            title: ActiveValue::Set(params.title),
            publisher: ActiveValue::Set(params.publisher),
            release_year: ActiveValue::Set(params.release_year),
            min_players: ActiveValue::Set(params.min_players),
            max_players: ActiveValue::Set(params.max_players),
            play_time_minutes: ActiveValue::Set(params.play_time_minutes),
            min_age: ActiveValue::Set(params.min_age),
            notes: ActiveValue::Set(params.notes),
            image_path: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Game::from_entity(entity))
    }

    pub async fn find_by_id(&self, game_id: i32) -> Result<Option<Game>, DbErr> {
        let entity = entity::prelude::Game::find_by_id(game_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Game::from_entity))
    }

    /// All games of `owner_id`, newest first.
    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Vec<Game>, DbErr> {
        let entities = entity::prelude::Game::find()
            .filter(entity::game::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::game::Column::CreatedAt)
            .order_by_desc(entity::game::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Game::from_entity).collect())
    }

    pub async fn count_by_owner(&self, owner_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Game::find()
            .filter(entity::game::Column::OwnerId.eq(owner_id))
            .count(self.db)
            .await
    }

    /// Replaces the editable fields of a game.
    ///
    /// # Returns
    /// - `Ok(Some(Game))` - Updated game
    /// - `Ok(None)` - Game does not exist
    pub async fn update(&self, game_id: i32, params: SaveGameParams) -> Result<Option<Game>, DbErr> {
        let Some(game) = entity::prelude::Game::find_by_id(game_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::game::ActiveModel = game.into();
        active.title = ActiveValue::Set(params.title);
        active.publisher = ActiveValue::Set(params.publisher);
        active.release_year = ActiveValue::Set(params.release_year);
        active.min_players = ActiveValue::Set(params.min_players);
        active.max_players = ActiveValue::Set(params.max_players);
        active.play_time_minutes = ActiveValue::Set(params.play_time_minutes);
        active.min_age = ActiveValue::Set(params.min_age);
        active.notes = ActiveValue::Set(params.notes);
        let updated = active.update(self.db).await?;

        Ok(Some(Game::from_entity(updated)))
    }

    /// Stores a new image path and returns the one it replaced.
    pub async fn set_image_path(
        &self,
        game_id: i32,
        image_path: Option<String>,
    ) -> Result<Option<String>, DbErr> {
        let Some(game) = entity::prelude::Game::find_by_id(game_id)
            .one(self.db)
            .await?
        else {
            return Err(DbErr::RecordNotFound(format!("game {}", game_id)));
        };

        let previous = game.image_path.clone();
        let mut active: entity::game::ActiveModel = game.into();
        active.image_path = ActiveValue::Set(image_path);
        active.update(self.db).await?;

        Ok(previous)
    }

    /// Deletes a game together with its marketplace offers.
    ///
    /// # Returns
    /// - `Ok(true)` - Game deleted
    /// - `Ok(false)` - Game did not exist
    pub async fn delete(&self, game_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::MarketplaceOffer::delete_many()
            .filter(entity::marketplace_offer::Column::GameId.eq(game_id))
            .exec(&txn)
            .await?;

        let result = entity::prelude::Game::delete_by_id(game_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
