//! Identity endpoints. Signup and login hand out bearer tokens; the rest
//! act on the session the token belongs to.

pub mod login;
pub mod logout;
pub mod session;
pub mod signup;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Username and password, as sent to signup and login.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A freshly issued session token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub user_id: Uuid,
    /// Send as `Authorization: Bearer <token>`
    pub token: String,
}

/// Signup and login, reachable without a token (mounted at /api/auth)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup::signup))
        .route("/login", post(login::login))
}

/// Session endpoints behind `require_auth` (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout::logout))
        .route("/session", get(session::current_session))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        signup::signup,
        login::login,
        logout::logout,
        session::current_session,
    ),
    components(schemas(Credentials, TokenResponse, session::SessionResponse))
)]
pub struct ApiDoc;
