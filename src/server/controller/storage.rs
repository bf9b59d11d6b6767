use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::api::ErrorDto,
    server::{error::AppError, state::AppState},
};

pub static STORAGE_TAG: &str = "storage";

/// Serves an uploaded image. Public, since avatars and images are embedded in pages.
#[utoipa::path(
    get,
    path = "/api/storage/{bucket}/{name}",
    tag = STORAGE_TAG,
    params(
        ("bucket" = String, Path, description = "avatars, games or communities"),
        ("name" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "Image content", content_type = "image/*", body = Vec<u8>),
        (status = 400, description = "Invalid file name", body = ErrorDto),
        (status = 404, description = "File not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path((bucket, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let file = state.storage().read(&bucket, &name).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.kind.content_type()),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        file.bytes,
    ))
}
