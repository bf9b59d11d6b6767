use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin, auth, changes, community, event, friend, game, marketplace, poll, storage, user,
    },
    error::AppError,
    state::AppState,
};

/// Sustained requests per second and per client IP.
const RATE_LIMIT_PER_SECOND: u64 = 10;
/// Requests a client IP may send in a burst above the sustained rate.
const RATE_LIMIT_BURST: u32 = 50;

#[derive(OpenApi)]
#[openapi(info(
    title = "Meeple Hub API",
    description = "Board game libraries, groups, events and a peer-to-peer marketplace"
))]
struct ApiDoc;

/// Builds the API router with OpenAPI documentation served at `/swagger-ui`.
///
/// Handlers sharing a path are registered in one `routes!` call. The API is rate limited per
/// client IP, so the server must be started with `into_make_service_with_connect_info`.
pub fn router(state: AppState) -> Result<Router, AppError> {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        // admin
        .routes(routes!(admin::get_all_users))
        .routes(routes!(admin::set_admin))
        // profiles
        .routes(routes!(user::get_own_profile, user::update_profile))
        .routes(routes!(user::upload_avatar))
        .routes(routes!(user::search_users))
        .routes(routes!(user::get_profile))
        // library
        .routes(routes!(game::list_own_games, game::create_game))
        .routes(routes!(game::update_game, game::delete_game))
        .routes(routes!(game::upload_game_image))
        .routes(routes!(game::list_user_games))
        // friends
        .routes(routes!(friend::list_friends))
        .routes(routes!(friend::list_requests, friend::send_request))
        .routes(routes!(friend::accept_request))
        .routes(routes!(friend::remove_friend))
        // groups
        .routes(routes!(
            community::list_communities,
            community::create_community
        ))
        .routes(routes!(community::list_my_communities))
        .routes(routes!(
            community::get_community,
            community::update_community,
            community::delete_community
        ))
        .routes(routes!(community::upload_community_image))
        .routes(routes!(community::join_community))
        .routes(routes!(community::leave_community))
        .routes(routes!(community::list_pending_requests))
        .routes(routes!(community::list_my_requests))
        .routes(routes!(community::approve_request))
        .routes(routes!(community::reject_request))
        .routes(routes!(community::cancel_request))
        .routes(routes!(community::promote_member))
        .routes(routes!(community::demote_member))
        .routes(routes!(community::remove_member))
        // polls
        .routes(routes!(poll::list_polls, poll::create_poll))
        .routes(routes!(poll::vote))
        .routes(routes!(poll::close_poll))
        .routes(routes!(poll::delete_poll))
        // events
        .routes(routes!(event::list_events, event::create_event))
        .routes(routes!(event::list_my_events))
        .routes(routes!(event::join_event))
        .routes(routes!(event::leave_event))
        .routes(routes!(event::update_event, event::delete_event))
        // marketplace
        .routes(routes!(marketplace::list_offers, marketplace::create_offer))
        .routes(routes!(marketplace::list_my_offers))
        .routes(routes!(marketplace::update_offer, marketplace::delete_offer))
        .routes(routes!(marketplace::list_ads, marketplace::create_ad))
        .routes(routes!(marketplace::list_my_ads))
        .routes(routes!(marketplace::close_ad))
        .routes(routes!(marketplace::delete_ad))
        .routes(routes!(marketplace::get_matches))
        // files and realtime
        .routes(routes!(storage::get_file))
        .routes(routes!(changes::stream_changes))
        .split_for_parts();

    let governor_config = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_PER_SECOND)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid rate limit configuration".to_string()))?;

    let max_upload_bytes = state.max_upload_bytes;

    let router = api_router
        .layer(GovernorLayer::new(Arc::new(governor_config)))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .with_state(state);

    Ok(router)
}
