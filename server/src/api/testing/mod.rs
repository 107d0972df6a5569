pub mod ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Liveness probe, reachable without a token (mounted at /api/test)
pub fn public_router() -> Router<AppState> {
    Router::new().route("/unauthed-ping", get(ping::unauthed_ping))
}

/// Token check (mounted at /api/test)
pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping::ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(ping::unauthed_ping, ping::ping),
    components(schemas(ping::PingResponse))
)]
pub struct ApiDoc;
