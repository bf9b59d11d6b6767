use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        change::{ChangeAction, ChangeTable},
        friend::{FriendDto, FriendRequestDto, FriendRequestsDto, SendFriendRequestDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::friend::FriendEntry,
        service::friend::FriendService,
        state::AppState,
    },
};

pub static FRIEND_TAG: &str = "friend";

#[utoipa::path(
    get,
    path = "/api/friends",
    tag = FRIEND_TAG,
    responses(
        (status = 200, description = "Accepted friendships", body = Vec<FriendDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_friends(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let friends: Vec<FriendDto> = FriendService::new(&state.db)
        .list_friends(user.id)
        .await?
        .into_iter()
        .map(FriendEntry::into_friend_dto)
        .collect();

    Ok((StatusCode::OK, Json(friends)))
}

#[utoipa::path(
    get,
    path = "/api/friends/requests",
    tag = FRIEND_TAG,
    responses(
        (status = 200, description = "Incoming and outgoing pending requests", body = FriendRequestsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (incoming, outgoing) = FriendService::new(&state.db).list_requests(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(FriendRequestsDto {
            incoming: incoming
                .into_iter()
                .map(FriendEntry::into_request_dto)
                .collect(),
            outgoing: outgoing
                .into_iter()
                .map(FriendEntry::into_request_dto)
                .collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/friends/requests",
    tag = FRIEND_TAG,
    request_body = SendFriendRequestDto,
    responses(
        (status = 201, description = "Request sent", body = FriendRequestDto),
        (status = 400, description = "Request to yourself", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Target user not found", body = ErrorDto),
        (status = 409, description = "Already friends or request pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_request(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SendFriendRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let entry = FriendService::new(&state.db)
        .send_request(user.id, payload.user_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::Friendship, ChangeAction::Insert, entry.friendship.id);

    Ok((StatusCode::CREATED, Json(entry.into_request_dto())))
}

#[utoipa::path(
    post,
    path = "/api/friends/{friendship_id}/accept",
    tag = FRIEND_TAG,
    params(
        ("friendship_id" = i32, Path, description = "Friendship ID")
    ),
    responses(
        (status = 200, description = "Request accepted", body = FriendDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the addressee can accept", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_request(
    State(state): State<AppState>,
    session: Session,
    Path(friendship_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let entry = FriendService::new(&state.db)
        .accept(user.id, friendship_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::Friendship, ChangeAction::Update, entry.friendship.id);

    Ok((StatusCode::OK, Json(entry.into_friend_dto())))
}

/// Declines a pending request, withdraws an own request or ends a friendship.
#[utoipa::path(
    delete,
    path = "/api/friends/{friendship_id}",
    tag = FRIEND_TAG,
    params(
        ("friendship_id" = i32, Path, description = "Friendship ID")
    ),
    responses(
        (status = 204, description = "Friendship removed"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Friendship not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_friend(
    State(state): State<AppState>,
    session: Session,
    Path(friendship_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let friendship = FriendService::new(&state.db)
        .remove(user.id, friendship_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::Friendship, ChangeAction::Delete, friendship.id);

    Ok(StatusCode::NO_CONTENT)
}
