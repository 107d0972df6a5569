use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::DbUuid;
use crate::photos::processing::{generate_thumbnail, MAX_THUMBNAIL_SIZE, THUMBNAIL_SIZE};
use crate::store;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ThumbnailParams {
    /// Longest edge in pixels, 1 to 800 (out-of-range values are clamped). Default: 200.
    pub size: Option<u32>,
}

fn jpeg_response(data: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "private, max-age=31536000, immutable"),
        ],
        data,
    )
}

#[utoipa::path(
    get,
    path = "/api/photos/{id}/thumbnail",
    tag = "photos",
    params(
        ("id" = Uuid, Path, description = "Photo ID"),
        ThumbnailParams,
    ),
    responses(
        (status = 200, description = "JPEG thumbnail", content_type = "image/jpeg"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No such photo for this user", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_thumbnail(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ThumbnailParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_conn!(pool);
    let id = DbUuid::from(id);

    let size = params.size.map_or(THUMBNAIL_SIZE, |s| s.clamp(1, MAX_THUMBNAIL_SIZE));

    // Fast path: the default size is rendered at upload time
    if size == THUMBNAIL_SIZE {
        let thumbnail = store::photos::thumbnail_for_owner(&mut conn, id, user.id)
            .map_err(|e| ApiError::fetch("fetch photo", e))?
            .ok_or(ApiError::NotFound("Photo"))?;
        return Ok(jpeg_response(thumbnail));
    }

    let photo = store::photos::get_for_owner(&mut conn, id, user.id)
        .map_err(|e| ApiError::fetch("fetch photo", e))?
        .ok_or(ApiError::NotFound("Photo"))?;

    let thumbnail = generate_thumbnail(&photo.data, size)
        .map_err(|e| ApiError::fetch("generate thumbnail", e))?;

    Ok(jpeg_response(thumbnail))
}
