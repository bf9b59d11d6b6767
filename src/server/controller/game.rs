use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        change::{ChangeAction, ChangeTable},
        game::{GameDto, GameQueryDto, SaveGameDto},
    },
    server::{
        controller::param::content_type,
        error::AppError,
        middleware::auth::AuthGuard,
        model::game::{Game, GameQuery, SaveGameParams},
        service::library::LibraryService,
        state::AppState,
    },
};

/// Tag for grouping library endpoints in OpenAPI documentation
pub static GAME_TAG: &str = "game";

#[utoipa::path(
    get,
    path = "/api/games",
    tag = GAME_TAG,
    params(
        ("search" = Option<String>, Query, description = "Title or publisher substring"),
        ("players" = Option<i32>, Query, description = "Player count the game must support"),
        ("sort" = Option<String>, Query, description = "title, players, play_time or added (default)"),
        ("direction" = Option<String>, Query, description = "asc or desc (default)")
    ),
    responses(
        (status = 200, description = "Own library", body = Vec<GameDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_own_games(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GameQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let games = LibraryService::new(&state.db)
        .list_games(user.id, &GameQuery::from_dto(query))
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(games))))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/games",
    tag = GAME_TAG,
    params(
        ("user_id" = i32, Path, description = "Owner of the library"),
        ("search" = Option<String>, Query, description = "Title or publisher substring"),
        ("players" = Option<i32>, Query, description = "Player count the game must support"),
        ("sort" = Option<String>, Query, description = "title, players, play_time or added (default)"),
        ("direction" = Option<String>, Query, description = "asc or desc (default)")
    ),
    responses(
        (status = 200, description = "The user's library", body = Vec<GameDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_games(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Query(query): Query<GameQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let games = LibraryService::new(&state.db)
        .list_games(user_id, &GameQuery::from_dto(query))
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(games))))
}

#[utoipa::path(
    post,
    path = "/api/games",
    tag = GAME_TAG,
    request_body = SaveGameDto,
    responses(
        (status = 201, description = "Game added to the library", body = GameDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_game(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SaveGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game = LibraryService::new(&state.db)
        .create_game(user.id, SaveGameParams::from_dto(payload))
        .await?;

    state
        .changes
        .publish(ChangeTable::Game, ChangeAction::Insert, game.id);

    Ok((StatusCode::CREATED, Json(game.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/games/{game_id}",
    tag = GAME_TAG,
    params(
        ("game_id" = i32, Path, description = "Game ID")
    ),
    request_body = SaveGameDto,
    responses(
        (status = 200, description = "Game updated", body = GameDto),
        (status = 400, description = "Invalid game data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Game belongs to another user", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_game(
    State(state): State<AppState>,
    session: Session,
    Path(game_id): Path<i32>,
    Json(payload): Json<SaveGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game = LibraryService::new(&state.db)
        .update_game(user.id, game_id, SaveGameParams::from_dto(payload))
        .await?;

    state
        .changes
        .publish(ChangeTable::Game, ChangeAction::Update, game.id);

    Ok((StatusCode::OK, Json(game.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/games/{game_id}",
    tag = GAME_TAG,
    params(
        ("game_id" = i32, Path, description = "Game ID")
    ),
    responses(
        (status = 204, description = "Game and its marketplace offers deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Game belongs to another user", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_game(
    State(state): State<AppState>,
    session: Session,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game = LibraryService::new(&state.db)
        .delete_game(&state.storage(), user.id, game_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::Game, ChangeAction::Delete, game.id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/games/{game_id}/image",
    tag = GAME_TAG,
    params(
        ("game_id" = i32, Path, description = "Game ID")
    ),
    request_body(content = Vec<u8>, description = "PNG, JPEG, WebP or GIF image", content_type = "image/*"),
    responses(
        (status = 200, description = "Image stored", body = GameDto),
        (status = 400, description = "Empty, oversized or unsupported image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Game belongs to another user", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_game_image(
    State(state): State<AppState>,
    session: Session,
    Path(game_id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game = LibraryService::new(&state.db)
        .upload_image(
            &state.storage(),
            user.id,
            game_id,
            content_type(&headers),
            &body,
        )
        .await?;

    state
        .changes
        .publish(ChangeTable::Game, ChangeAction::Update, game.id);

    Ok((StatusCode::OK, Json(game.into_dto())))
}

fn into_dtos(games: Vec<Game>) -> Vec<GameDto> {
    games.into_iter().map(Game::into_dto).collect()
}
