use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
    /// Set when the request carried a valid token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/test/unauthed-ping",
    tag = "testing",
    responses((status = 200, description = "Server is up", body = PingResponse))
)]
pub async fn unauthed_ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "unauthed-ping".to_string(),
        username: None,
    })
}

#[utoipa::path(
    get,
    path = "/api/test/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Token is valid", body = PingResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn ping(AuthUser(user): AuthUser) -> Json<PingResponse> {
    Json(PingResponse {
        message: "ping".to_string(),
        username: Some(user.username),
    })
}
