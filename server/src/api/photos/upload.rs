use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::photos::processing::process_image;
use crate::photos::resolve_url;
use crate::store;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use cookbook_core::MAX_FILE_SIZE;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadPhotoResponse {
    pub id: Uuid,
    /// Where the stored image can be fetched from
    pub url: String,
}

/// Multipart form layout, for the API description only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoForm {
    /// JPEG, PNG, GIF or WebP, at most 10 MiB
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    tracing::warn!(error = %e, "Rejected multipart upload");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(format!(
            "File too large. Maximum size is {} bytes",
            MAX_FILE_SIZE
        ))
    } else {
        ApiError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

#[utoipa::path(
    post,
    path = "/api/photos",
    tag = "photos",
    request_body(content_type = "multipart/form-data", content = UploadPhotoForm),
    responses(
        (status = 201, description = "Photo stored", body = UploadPhotoResponse),
        (status = 400, description = "Missing file, or not an allowed image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_photo(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadPhotoResponse>), ApiError> {
    // Take the first part that carries a file
    let (file_name, data) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
            .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let data = field.bytes().await.map_err(multipart_error)?;
            break (file_name, data);
        }
    };

    let (content_type, thumbnail) = process_image(&data)?;

    let mut conn = get_conn!(pool);

    let id = store::photos::insert(
        &mut conn,
        user.id,
        &file_name,
        &content_type,
        &data,
        &thumbnail,
    )
    .map_err(|e| ApiError::write("save photo", e))?;

    tracing::info!(photo_id = %id, size = data.len(), "Photo uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadPhotoResponse {
            id,
            url: resolve_url(id),
        }),
    ))
}
