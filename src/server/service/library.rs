//! Game library service.
//!
//! Owners manage their own games; anyone logged in can browse another user's library.
//! Listings are fetched newest first and then searched and sorted in memory by `GameQuery`.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{game::GameRepository, user::UserRepository},
    error::AppError,
    model::{
        game::{Game, GameQuery, SaveGameParams},
        storage::Bucket,
    },
    service::storage::StorageService,
};

pub struct LibraryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LibraryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's games filtered and sorted by `query`.
    ///
    /// # Returns
    /// - `Ok(Vec<Game>)` - Matching games in the requested order
    /// - `Err(AppError::NotFound)` - The user does not exist
    pub async fn list_games(&self, owner_id: i32, query: &GameQuery) -> Result<Vec<Game>, AppError> {
        if UserRepository::new(self.db)
            .find_by_id(owner_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let games = GameRepository::new(self.db).get_by_owner(owner_id).await?;

        Ok(query.apply(games))
    }

    pub async fn get_game(&self, game_id: i32) -> Result<Game, AppError> {
        GameRepository::new(self.db)
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    pub async fn create_game(&self, owner_id: i32, params: SaveGameParams) -> Result<Game, AppError> {
        params.validate()?;

        let game = GameRepository::new(self.db).create(owner_id, params).await?;
        tracing::debug!("User {} added game {} to their library", owner_id, game.id);

        Ok(game)
    }

    /// Replaces a game's fields.
    ///
    /// # Returns
    /// - `Ok(Game)` - Updated game
    /// - `Err(AppError::BadRequest)` - Validation failed
    /// - `Err(AppError::NotFound)` - Game does not exist
    /// - `Err(AppError::Forbidden)` - Caller does not own the game
    pub async fn update_game(
        &self,
        user_id: i32,
        game_id: i32,
        params: SaveGameParams,
    ) -> Result<Game, AppError> {
        params.validate()?;
        self.owned_game(user_id, game_id).await?;

        GameRepository::new(self.db)
            .update(game_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    /// Deletes a game with its marketplace offers, then its image file.
    pub async fn delete_game(
        &self,
        storage: &StorageService<'_>,
        user_id: i32,
        game_id: i32,
    ) -> Result<Game, AppError> {
        let game = self.owned_game(user_id, game_id).await?;

        if !GameRepository::new(self.db).delete(game_id).await? {
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        if let Some(path) = &game.image_path {
            storage.remove(path).await;
        }

        Ok(game)
    }

    /// Stores a new cover image and deletes the one it replaces.
    pub async fn upload_image(
        &self,
        storage: &StorageService<'_>,
        user_id: i32,
        game_id: i32,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Game, AppError> {
        self.owned_game(user_id, game_id).await?;

        let game_repo = GameRepository::new(self.db);
        let path = storage
            .save(Bucket::Games, game_id, content_type, bytes)
            .await?;
        let previous = match game_repo.set_image_path(game_id, Some(path.clone())).await {
            Ok(previous) => previous,
            Err(e) => {
                storage.remove(&path).await;
                return Err(e.into());
            }
        };
        if let Some(previous) = previous {
            storage.remove(&previous).await;
        }

        self.get_game(game_id).await
    }

    async fn owned_game(&self, user_id: i32, game_id: i32) -> Result<Game, AppError> {
        let game = self.get_game(game_id).await?;
        if game.owner_id != user_id {
            return Err(AppError::Forbidden(
                "You can only change games in your own library".to_string(),
            ));
        }
        Ok(game)
    }
}
