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
        community::{
            CommunityDetailDto, CommunityDto, CommunitySearchDto, JoinCommunityDto,
            JoinRequestDto, JoinResultDto, SaveCommunityDto,
        },
    },
    server::{
        controller::param::content_type,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::community::{
            Community, JoinOutcome, JoinRequestEntry, SaveCommunityParams,
        },
        service::community::CommunityService,
        state::AppState,
    },
};

/// Tag for grouping group endpoints in OpenAPI documentation
pub static COMMUNITY_TAG: &str = "community";

#[utoipa::path(
    get,
    path = "/api/communities",
    tag = COMMUNITY_TAG,
    params(
        ("search" = Option<String>, Query, description = "Name, description or location substring")
    ),
    responses(
        (status = 200, description = "Groups, newest first", body = Vec<CommunityDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_communities(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CommunitySearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let communities = CommunityService::new(&state.db)
        .list(params.search.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(communities))))
}

#[utoipa::path(
    get,
    path = "/api/communities/mine",
    tag = COMMUNITY_TAG,
    responses(
        (status = 200, description = "Groups the caller is a member of", body = Vec<CommunityDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_communities(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let communities = CommunityService::new(&state.db)
        .list_for_user(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(communities))))
}

#[utoipa::path(
    post,
    path = "/api/communities",
    tag = COMMUNITY_TAG,
    request_body = SaveCommunityDto,
    responses(
        (status = 201, description = "Group created with the caller as admin", body = CommunityDto),
        (status = 400, description = "Invalid group data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "A group with this name already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_community(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SaveCommunityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let community = CommunityService::new(&state.db)
        .create(user.id, SaveCommunityParams::from_dto(payload))
        .await?;

    state
        .changes
        .publish(ChangeTable::Community, ChangeAction::Insert, community.id);

    Ok((StatusCode::CREATED, Json(community.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group with members and the caller's relation", body = CommunityDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let detail = CommunityService::new(&state.db)
        .get_detail(community_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    request_body = SaveCommunityDto,
    responses(
        (status = 200, description = "Group updated", body = CommunityDto),
        (status = 400, description = "Invalid group data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 409, description = "A group with this name already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(payload): Json<SaveCommunityDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let community = CommunityService::new(&state.db)
        .update(community_id, SaveCommunityParams::from_dto(payload))
        .await?;

    state
        .changes
        .publish(ChangeTable::Community, ChangeAction::Update, community.id);

    Ok((StatusCode::OK, Json(community.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/communities/{community_id}",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 204, description = "Group and everything in it deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let community = CommunityService::new(&state.db)
        .delete(&state.storage(), community_id)
        .await?;

    tracing::info!("User {} deleted group {}", user.username, community.name);
    state
        .changes
        .publish(ChangeTable::Community, ChangeAction::Delete, community.id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/communities/{community_id}/image",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    request_body(content = Vec<u8>, description = "PNG, JPEG, WebP or GIF image", content_type = "image/*"),
    responses(
        (status = 200, description = "Image stored", body = CommunityDto),
        (status = 400, description = "Empty, oversized or unsupported image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_community_image(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let community = CommunityService::new(&state.db)
        .upload_image(&state.storage(), community_id, content_type(&headers), &body)
        .await?;

    state
        .changes
        .publish(ChangeTable::Community, ChangeAction::Update, community.id);

    Ok((StatusCode::OK, Json(community.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/join",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    request_body = JoinCommunityDto,
    responses(
        (status = 200, description = "Joined, or request created for moderated groups", body = JoinResultDto),
        (status = 400, description = "Group is full", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 409, description = "Already a member or request pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
    Json(payload): Json<JoinCommunityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let outcome = CommunityService::new(&state.db)
        .join(community_id, user.id, payload.message)
        .await?;

    match &outcome {
        JoinOutcome::Joined(membership) => state.changes.publish_in_community(
            ChangeTable::CommunityMember,
            ChangeAction::Insert,
            membership.id,
            community_id,
        ),
        JoinOutcome::Requested(request) => state.changes.publish_in_community(
            ChangeTable::JoinRequest,
            ChangeAction::Insert,
            request.id,
            community_id,
        ),
    }

    Ok((StatusCode::OK, Json(outcome.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/leave",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 204, description = "Left the group"),
        (status = 400, description = "The last admin cannot leave", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Not a member of the group", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_community(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let membership = CommunityService::new(&state.db)
        .leave(community_id, user.id)
        .await?;

    state.changes.publish_in_community(
        ChangeTable::CommunityMember,
        ChangeAction::Delete,
        membership.id,
        community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/communities/{community_id}/requests",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Pending join requests", body = Vec<JoinRequestDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_pending_requests(
    State(state): State<AppState>,
    session: Session,
    Path(community_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let requests = CommunityService::new(&state.db)
        .list_pending_requests(community_id)
        .await?;

    Ok((StatusCode::OK, Json(request_dtos(requests))))
}

#[utoipa::path(
    get,
    path = "/api/join-requests/mine",
    tag = COMMUNITY_TAG,
    responses(
        (status = 200, description = "The caller's join requests", body = Vec<JoinRequestDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let requests = CommunityService::new(&state.db)
        .list_my_requests(user.id)
        .await?;

    Ok((StatusCode::OK, Json(request_dtos(requests))))
}

#[utoipa::path(
    post,
    path = "/api/join-requests/{request_id}/approve",
    tag = COMMUNITY_TAG,
    params(
        ("request_id" = i32, Path, description = "Join request ID")
    ),
    responses(
        (status = 204, description = "Request approved and member added"),
        (status = 400, description = "Request not pending or group full", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_request(
    State(state): State<AppState>,
    session: Session,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = CommunityService::new(&state.db);
    let request = service.get_request(request_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(request.community_id)])
        .await?;

    let membership = service.approve_request(&request, user.id).await?;

    state.changes.publish_in_community(
        ChangeTable::JoinRequest,
        ChangeAction::Update,
        request.id,
        request.community_id,
    );
    state.changes.publish_in_community(
        ChangeTable::CommunityMember,
        ChangeAction::Insert,
        membership.id,
        request.community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/join-requests/{request_id}/reject",
    tag = COMMUNITY_TAG,
    params(
        ("request_id" = i32, Path, description = "Join request ID")
    ),
    responses(
        (status = 204, description = "Request rejected"),
        (status = 400, description = "Request is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_request(
    State(state): State<AppState>,
    session: Session,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = CommunityService::new(&state.db);
    let request = service.get_request(request_id).await?;

    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(request.community_id)])
        .await?;

    service.reject_request(&request, user.id).await?;

    state.changes.publish_in_community(
        ChangeTable::JoinRequest,
        ChangeAction::Update,
        request.id,
        request.community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/join-requests/{request_id}",
    tag = COMMUNITY_TAG,
    params(
        ("request_id" = i32, Path, description = "Join request ID")
    ),
    responses(
        (status = 204, description = "Own pending request withdrawn"),
        (status = 400, description = "Request is not pending", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    session: Session,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let request = CommunityService::new(&state.db)
        .cancel_request(user.id, request_id)
        .await?;

    state.changes.publish_in_community(
        ChangeTable::JoinRequest,
        ChangeAction::Delete,
        request.id,
        request.community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/members/{user_id}/promote",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID"),
        ("user_id" = i32, Path, description = "Member's user ID")
    ),
    responses(
        (status = 204, description = "Member promoted to admin"),
        (status = 400, description = "User is already an admin", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group or membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn promote_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let membership = CommunityService::new(&state.db)
        .promote(community_id, user_id)
        .await?;

    state.changes.publish_in_community(
        ChangeTable::CommunityMember,
        ChangeAction::Update,
        membership.id,
        community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/communities/{community_id}/members/{user_id}/demote",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID"),
        ("user_id" = i32, Path, description = "Admin's user ID")
    ),
    responses(
        (status = 204, description = "Admin demoted to member"),
        (status = 400, description = "Not an admin, or the last admin", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group or membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn demote_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let membership = CommunityService::new(&state.db)
        .demote(community_id, user_id)
        .await?;

    state.changes.publish_in_community(
        ChangeTable::CommunityMember,
        ChangeAction::Update,
        membership.id,
        community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/communities/{community_id}/members/{user_id}",
    tag = COMMUNITY_TAG,
    params(
        ("community_id" = i32, Path, description = "Group ID"),
        ("user_id" = i32, Path, description = "Member's user ID")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Admins leave instead of removing themselves", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a group admin", body = ErrorDto),
        (status = 404, description = "Group or membership not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    session: Session,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CommunityAdmin(community_id)])
        .await?;

    let membership = CommunityService::new(&state.db)
        .remove_member(community_id, actor.id, user_id)
        .await?;

    state.changes.publish_in_community(
        ChangeTable::CommunityMember,
        ChangeAction::Delete,
        membership.id,
        community_id,
    );

    Ok(StatusCode::NO_CONTENT)
}

fn into_dtos(communities: Vec<Community>) -> Vec<CommunityDto> {
    communities.into_iter().map(Community::into_dto).collect()
}

fn request_dtos(requests: Vec<JoinRequestEntry>) -> Vec<JoinRequestDto> {
    requests
        .into_iter()
        .map(JoinRequestEntry::into_dto)
        .collect()
}
