use crate::api::ErrorResponse;
use crate::auth::{delete_session, AuthSession};
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    auth: AuthSession,
    State(pool): State<Arc<DbPool>>,
) -> Result<StatusCode, ApiError> {
    let mut conn = get_conn!(pool);

    delete_session(&mut conn, auth.session.id)
        .map_err(|e| ApiError::write("end session", e))?;

    tracing::info!(user_id = %auth.user.id, "User signed out");

    Ok(StatusCode::NO_CONTENT)
}
