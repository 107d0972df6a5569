pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod photos;
pub mod schema;
pub mod store;
pub mod telemetry;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, FromRef, MatchedPath};
use axum::http::{Request, Response};
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{Level, Span};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::db::DbPool;

/// Routes polled often enough that a span per request is noise.
const QUIET_PATHS: &[&str] = &["/api/test/unauthed-ping"];

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: DbPool, settings: Settings) -> Self {
        Self {
            pool: Arc::new(pool),
            settings: Arc::new(settings),
        }
    }
}

impl FromRef<AppState> for Arc<DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

fn request_span(request: &Request<Body>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or(request.uri().path());

    if QUIET_PATHS.contains(&path) {
        tracing::trace_span!("http_request")
    } else {
        tracing::info_span!("http_request", method = %request.method(), path = %path)
    }
}

fn log_response(response: &Response<Body>, latency: Duration, span: &Span) {
    if span.metadata().map(|m| *m.level()) == Some(Level::TRACE) {
        return;
    }

    let status = response.status();
    let latency_ms = latency.as_millis();
    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "request failed with server error"
        );
    } else {
        tracing::info!(
            status = status.as_u16(),
            latency_ms = %latency_ms,
            "request completed"
        );
    }
}

fn log_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(error = %error, latency_ms = %latency.as_millis(), "request failed");
}

/// Build the full application router: public and protected API routes,
/// Swagger UI and request tracing.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .nest("/api/auth", api::auth::public_router())
        .nest("/api/test", api::testing::public_router());

    // Everything below requires a bearer token
    let protected = Router::new()
        .nest("/api/auth", api::auth::router())
        .nest("/api/test", api::testing::router())
        .nest("/api/photos", api::photos::router())
        .nest("/api/recipes", api::recipes::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi()))
        .layer(DefaultBodyLimit::max(photos::MAX_UPLOAD_BODY))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(())
                .on_response(log_response)
                .on_failure(log_failure),
        )
}
