use crate::api::ErrorResponse;
use crate::auth::AuthSession;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// The identity behind the caller's token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub username: String,
    /// When the token stops working (UTC)
    pub expires_at: NaiveDateTime,
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn current_session(auth: AuthSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: auth.user.id.into(),
        username: auth.user.username,
        expires_at: auth.session.expires_at,
    })
}
