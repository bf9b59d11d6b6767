use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        change::{ChangeAction, ChangeTable},
        marketplace::{
            CreateOfferDto, CreateSearchAdDto, OfferDto, OfferSearchDto, SearchAdDto,
            SearchAdSearchDto, UpdateOfferDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::marketplace::{
            CreateOfferParams, CreateSearchAdParams, OfferFilter, OfferListing, SearchAdFilter,
            SearchAdListing, UpdateOfferParams,
        },
        service::marketplace::MarketplaceService,
        state::AppState,
    },
};

/// Tag for grouping marketplace endpoints in OpenAPI documentation
pub static MARKETPLACE_TAG: &str = "marketplace";

#[utoipa::path(
    get,
    path = "/api/marketplace/offers",
    tag = MARKETPLACE_TAG,
    params(
        ("offer_type" = Option<String>, Query, description = "lend, trade or sell"),
        ("search" = Option<String>, Query, description = "Game title substring")
    ),
    responses(
        (status = 200, description = "Active offers, newest first", body = Vec<OfferDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_offers(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<OfferSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offers = MarketplaceService::new(&state.db)
        .list_offers(OfferFilter::from_dto(params))
        .await?;

    Ok((StatusCode::OK, Json(offer_dtos(offers))))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/offers/mine",
    tag = MARKETPLACE_TAG,
    responses(
        (status = 200, description = "The caller's offers, active or not", body = Vec<OfferDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_offers(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offers = MarketplaceService::new(&state.db)
        .list_my_offers(user.id)
        .await?;

    Ok((StatusCode::OK, Json(offer_dtos(offers))))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/offers",
    tag = MARKETPLACE_TAG,
    request_body = CreateOfferDto,
    responses(
        (status = 201, description = "Offer published", body = OfferDto),
        (status = 400, description = "Price does not fit the offer type", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Game belongs to another user", body = ErrorDto),
        (status = 404, description = "Game not found", body = ErrorDto),
        (status = 409, description = "An active offer of this type exists for the game", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_offer(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateOfferDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offer = MarketplaceService::new(&state.db)
        .create_offer(CreateOfferParams::from_dto(user.id, payload))
        .await?;

    state.changes.publish(
        ChangeTable::MarketplaceOffer,
        ChangeAction::Insert,
        offer.offer.id,
    );

    Ok((StatusCode::CREATED, Json(offer.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/marketplace/offers/{offer_id}",
    tag = MARKETPLACE_TAG,
    params(
        ("offer_id" = i32, Path, description = "Offer ID")
    ),
    request_body = UpdateOfferDto,
    responses(
        (status = 200, description = "Offer updated", body = OfferDto),
        (status = 400, description = "Price does not fit the offer type", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Offer belongs to another user", body = ErrorDto),
        (status = 404, description = "Offer not found", body = ErrorDto),
        (status = 409, description = "Reactivation would duplicate an active offer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_offer(
    State(state): State<AppState>,
    session: Session,
    Path(offer_id): Path<i32>,
    Json(payload): Json<UpdateOfferDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offer = MarketplaceService::new(&state.db)
        .update_offer(user.id, offer_id, UpdateOfferParams::from_dto(payload))
        .await?;

    state.changes.publish(
        ChangeTable::MarketplaceOffer,
        ChangeAction::Update,
        offer.offer.id,
    );

    Ok((StatusCode::OK, Json(offer.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/marketplace/offers/{offer_id}",
    tag = MARKETPLACE_TAG,
    params(
        ("offer_id" = i32, Path, description = "Offer ID")
    ),
    responses(
        (status = 204, description = "Offer deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Offer belongs to another user", body = ErrorDto),
        (status = 404, description = "Offer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_offer(
    State(state): State<AppState>,
    session: Session,
    Path(offer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offer = MarketplaceService::new(&state.db)
        .delete_offer(&user, offer_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::MarketplaceOffer, ChangeAction::Delete, offer.id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/marketplace/ads",
    tag = MARKETPLACE_TAG,
    params(
        ("ad_type" = Option<String>, Query, description = "buy, rent or trade"),
        ("search" = Option<String>, Query, description = "Game title substring")
    ),
    responses(
        (status = 200, description = "Active search ads, newest first", body = Vec<SearchAdDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_ads(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchAdSearchDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ads = MarketplaceService::new(&state.db)
        .list_ads(SearchAdFilter::from_dto(params))
        .await?;

    Ok((StatusCode::OK, Json(ad_dtos(ads))))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/ads/mine",
    tag = MARKETPLACE_TAG,
    responses(
        (status = 200, description = "The caller's search ads, active or not", body = Vec<SearchAdDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_ads(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ads = MarketplaceService::new(&state.db)
        .list_my_ads(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ad_dtos(ads))))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/ads",
    tag = MARKETPLACE_TAG,
    request_body = CreateSearchAdDto,
    responses(
        (status = 201, description = "Search ad published", body = SearchAdDto),
        (status = 400, description = "Invalid title or price limit", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_ad(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateSearchAdDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ad = MarketplaceService::new(&state.db)
        .create_ad(CreateSearchAdParams::from_dto(user.id, payload))
        .await?;

    state
        .changes
        .publish(ChangeTable::SearchAd, ChangeAction::Insert, ad.ad.id);

    Ok((StatusCode::CREATED, Json(ad.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/ads/{ad_id}/close",
    tag = MARKETPLACE_TAG,
    params(
        ("ad_id" = i32, Path, description = "Search ad ID")
    ),
    responses(
        (status = 204, description = "Search ad closed"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Search ad belongs to another user", body = ErrorDto),
        (status = 404, description = "Search ad not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn close_ad(
    State(state): State<AppState>,
    session: Session,
    Path(ad_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ad = MarketplaceService::new(&state.db)
        .close_ad(user.id, ad_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::SearchAd, ChangeAction::Update, ad.id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/marketplace/ads/{ad_id}",
    tag = MARKETPLACE_TAG,
    params(
        ("ad_id" = i32, Path, description = "Search ad ID")
    ),
    responses(
        (status = 204, description = "Search ad deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Search ad belongs to another user", body = ErrorDto),
        (status = 404, description = "Search ad not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_ad(
    State(state): State<AppState>,
    session: Session,
    Path(ad_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let ad = MarketplaceService::new(&state.db)
        .delete_ad(&user, ad_id)
        .await?;

    state
        .changes
        .publish(ChangeTable::SearchAd, ChangeAction::Delete, ad.id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/marketplace/ads/{ad_id}/matches",
    tag = MARKETPLACE_TAG,
    params(
        ("ad_id" = i32, Path, description = "Search ad ID")
    ),
    responses(
        (status = 200, description = "Active offers that satisfy the ad", body = Vec<OfferDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Search ad not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_matches(
    State(state): State<AppState>,
    session: Session,
    Path(ad_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let offers = MarketplaceService::new(&state.db).matches(ad_id).await?;

    Ok((StatusCode::OK, Json(offer_dtos(offers))))
}

fn offer_dtos(offers: Vec<OfferListing>) -> Vec<OfferDto> {
    offers.into_iter().map(OfferListing::into_dto).collect()
}

fn ad_dtos(ads: Vec<SearchAdListing>) -> Vec<SearchAdDto> {
    ads.into_iter().map(SearchAdListing::into_dto).collect()
}
