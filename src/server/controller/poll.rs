use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        change::{ChangeAction, ChangeTable},
        poll::{CreatePollDto, PollDto, VoteDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::poll::{CreatePollParams, PollResults},
        service::poll::PollService,
        state::AppState,
    },
};

pub static POLL_TAG: &str = "poll";

#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/polls",
    tag = POLL_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Polls of the group with results", body = Vec<PollDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_polls(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(community_id)])
        .await?;

    let polls: Vec<PollDto> = PollService::new(&state.db)
        .list(community_id, user.id)
        .await?
        .into_iter()
        .map(PollResults::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(polls)))
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/polls",
    tag = POLL_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    request_body = CreatePollDto,
    responses(
        (status = 201, description = "Poll created", body = PollDto),
        (status = 400, description = "Invalid question, options or deadline", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_poll(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(payload): Json<CreatePollDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(community_id)])
        .await?;

    let poll = PollService::new(&state.db)
        .create(
            CreatePollParams::from_dto(community_id, user.id, payload),
            Utc::now(),
        )
        .await?;

    state.changes.publish_in_community(
        ChangeTable::Poll,
        ChangeAction::Insert,
        poll.poll.id,
        community_id,
    );

    Ok((StatusCode::CREATED, Json(poll.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/polls/{poll_id}/vote",
    tag = POLL_TAG,
    params(
        ("poll_id" = i32, Path, description = "Poll ID")
    ),
    request_body = VoteDto,
    responses(
        (status = 200, description = "Vote recorded", body = PollDto),
        (status = 400, description = "Poll closed or option not part of the poll", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 409, description = "Already voted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn vote(
    State(state): State<AppState>,
    session: Session,
    Path(poll_id): Path<i32>,
    Json(payload): Json<VoteDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = PollService::new(&state.db);
    let poll = service.get(poll_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(poll.community_id)])
        .await?;

    let results = service
        .vote(&poll, payload.option_id, user.id, Utc::now())
        .await?;

    state.changes.publish_in_community(
        ChangeTable::Poll,
        ChangeAction::Update,
        poll.id,
        poll.community_id,
    );

    Ok((StatusCode::OK, Json(results.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/polls/{poll_id}/close",
    tag = POLL_TAG,
    params(
        ("poll_id" = i32, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "Poll closed", body = PollDto),
        (status = 400, description = "Poll already closed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the creator or a group admin can close", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn close_poll(
    State(state): State<AppState>,
    session: Session,
    Path(poll_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = PollService::new(&state.db);
    let poll = service.get(poll_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(poll.community_id)])
        .await?;

    let results = service.close(&poll, &user).await?;

    state.changes.publish_in_community(
        ChangeTable::Poll,
        ChangeAction::Update,
        poll.id,
        poll.community_id,
    );

    Ok((StatusCode::OK, Json(results.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/polls/{poll_id}",
    tag = POLL_TAG,
    params(
        ("poll_id" = i32, Path, description = "Poll ID")
    ),
    responses(
        (status = 204, description = "Poll deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the creator or a group admin can delete", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_poll(
    State(state): State<AppState>,
    session: Session,
    Path(poll_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = PollService::new(&state.db);
    let poll = service.get(poll_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(poll.community_id)])
        .await?;

    service.delete(&poll, &user).await?;

    state.changes.publish_in_community(
        ChangeTable::Poll,
        ChangeAction::Delete,
        poll.id,
        poll.community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}
