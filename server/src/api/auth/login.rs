use super::{Credentials, TokenResponse};
use crate::api::{ErrorResponse, JsonBody};
use crate::auth::{create_session, verify_password};
use crate::config::Settings;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, Json};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use std::sync::Arc;

/// Same message for unknown users and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn find_active_user(conn: &mut SqliteConnection, username: &str) -> QueryResult<Option<User>> {
    users::table
        .filter(
            sql::<Bool>("LOWER(username) = LOWER(")
                .bind::<Text, _>(username)
                .sql(")"),
        )
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .first(conn)
        .optional()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut conn = get_conn!(pool);

    let user = find_active_user(&mut conn, credentials.username.trim())
        .map_err(|e| ApiError::fetch("look up user", e))?
        .filter(|user| verify_password(&credentials.password, &user.password_hash))
        .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

    let token = create_session(&mut conn, user.id, settings.session_ttl)
        .map_err(|e| ApiError::write("create session", e))?;

    Ok(Json(TokenResponse {
        user_id: user.id.into(),
        token,
    }))
}
