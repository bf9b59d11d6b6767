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
        event::{EventDto, SaveEventDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::event::{EventSummary, SaveEventParams},
        service::event::EventService,
        state::AppState,
    },
};

pub static EVENT_TAG: &str = "event";

#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/events",
    tag = EVENT_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Upcoming events, soonest first", body = Vec<EventDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_events(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(community_id)])
        .await?;

    let events = EventService::new(&state.db)
        .list_upcoming(community_id, user.id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(events))))
}

#[utoipa::path(
    get,
    path = "/api/events/mine",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "Upcoming events the caller registered for", body = Vec<EventDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_events(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let events = EventService::new(&state.db)
        .list_mine(user.id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(events))))
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/events",
    tag = EVENT_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    request_body = SaveEventDto,
    responses(
        (status = 201, description = "Event created with the organizer registered", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(payload): Json<SaveEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(community_id)])
        .await?;

    let event = EventService::new(&state.db)
        .create(
            community_id,
            user.id,
            SaveEventParams::from_dto(payload),
            Utc::now(),
        )
        .await?;

    state.changes.publish_in_community(
        ChangeTable::Event,
        ChangeAction::Insert,
        event.event.id,
        community_id,
    );

    Ok((StatusCode::CREATED, Json(event.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/join",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Registered for the event", body = EventDto),
        (status = 400, description = "Event full or already started", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_event(
    State(state): State<AppState>,
    session: Session,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = EventService::new(&state.db);
    let event = service.get(event_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(event.community_id)])
        .await?;

    let summary = service.join(&event, user.id, Utc::now()).await?;

    state.changes.publish_in_community(
        ChangeTable::Event,
        ChangeAction::Update,
        event.id,
        event.community_id,
    );

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/leave",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Registration removed", body = EventDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Event not found or not registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_event(
    State(state): State<AppState>,
    session: Session,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = EventService::new(&state.db);
    let event = service.get(event_id).await?;
    let summary = service.leave(&event, user.id).await?;

    state.changes.publish_in_community(
        ChangeTable::Event,
        ChangeAction::Update,
        event.id,
        event.community_id,
    );

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = SaveEventDto,
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the organizer or a group admin can edit", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    session: Session,
    Path(event_id): Path<i32>,
    Json(payload): Json<SaveEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = EventService::new(&state.db);
    let event = service.get(event_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(event.community_id)])
        .await?;

    let summary = service
        .update(&event, &user, SaveEventParams::from_dto(payload), Utc::now())
        .await?;

    state.changes.publish_in_community(
        ChangeTable::Event,
        ChangeAction::Update,
        event.id,
        event.community_id,
    );

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Only the organizer or a group admin can delete", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = EventService::new(&state.db);
    let event = service.get(event_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityMember(event.community_id)])
        .await?;

    service.delete(&event, &user).await?;

    state.changes.publish_in_community(
        ChangeTable::Event,
        ChangeAction::Delete,
        event.id,
        event.community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

fn into_dtos(events: Vec<EventSummary>) -> Vec<EventDto> {
    events.into_iter().map(EventSummary::into_dto).collect()
}
